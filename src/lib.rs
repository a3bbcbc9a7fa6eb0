// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![deny(warnings, missing_docs, clippy::all)]

//! Route GitHub code scanning API calls through corporate HTTP proxies.
//!
//! The heart of this crate is [`resolver::decide`], which picks the proxy for calls to the GitHub
//! API:
//!
//! 1. A proxy given explicitly by the caller always wins.
//! 2. Otherwise the first non-empty of `$http_proxy`, `$HTTP_PROXY`, `$https_proxy` and
//!    `$HTTPS_PROXY` is used,
//! 3. unless the host of the API URL is listed in `$no_proxy` or `$NO_PROXY`.
//!
//! Note that `$no_proxy` only supports exact host names, unlike curl.  See [`noproxy`].
//!
//! Nothing in this crate reads the process environment implicitly; take a snapshot with
//! [`env::Environment::from_process()`] and pass it around.
//!
//! ```
//! use scan_report_proxy::env::Environment;
//! use scan_report_proxy::resolver::resolve;
//!
//! let env: Environment = [
//!     ("HTTPS_PROXY", "http://corp-proxy:3128"),
//!     ("NO_PROXY", "api.github.com"),
//! ]
//! .into_iter()
//! .collect();
//! assert_eq!(resolve("https://api.github.com", None, &env).unwrap(), None);
//! ```
//!
//! [`client::ClientConfig`] turns the proxy into a [`reqwest`] client, and [`action::run`]
//! wires everything up for a GitHub Action which renders code scanning reports with an external
//! [`action::ReportGenerator`].

pub mod action;
pub mod client;
pub mod env;
pub mod error;
pub mod inputs;
pub mod noproxy;
pub mod resolver;

pub use error::{Error, Result};
pub use resolver::{decide, resolve, ProxyDecision, ProxyHandle};
