// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Errors of this crate.

/// Everything that can go wrong while preparing or running a report step.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The API base URL could not be parsed.
    #[error("Invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// The offending value.
        url: String,
        /// Why parsing failed.
        source: url::ParseError,
    },
    /// The URL parsed, but has no host to match against no-proxy rules.
    #[error("URL {0} has no host")]
    MissingHost(String),
    /// A proxy value was not a valid URL.
    #[error("Invalid proxy URL {value:?} from {origin}: {source}")]
    InvalidProxyUrl {
        /// Where the value came from, e.g. `$HTTPS_PROXY` or `explicit proxy`.
        origin: String,
        /// The offending value.
        value: String,
        /// Why parsing failed.
        source: url::ParseError,
    },
    /// A required action input was missing or empty.
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),
    /// The API token cannot be used in an HTTP header.
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,
    /// Building the HTTP client failed.
    #[error("Failed to configure HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The report generator failed.
    #[error("Failed to generate report: {0}")]
    Report(#[source] Box<dyn std::error::Error + Send + Sync>),
}

static_assertions::assert_impl_all!(Error: Send, Sync);

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;
