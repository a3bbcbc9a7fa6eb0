// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configure HTTP clients for the GitHub API.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use url::Url;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::resolver::ProxyHandle;

/// The public GitHub API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The variable through which GitHub Actions announces the API URL, e.g. on GitHub Enterprise.
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Timeout for every API request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Get the base URL of the GitHub API.
///
/// Use `url` if given and not empty, otherwise `$GITHUB_API_URL`, and finally
/// [`DEFAULT_API_URL`].
pub fn api_base_url(url: Option<&str>, env: &Environment) -> String {
    url.filter(|url| !url.is_empty())
        .or_else(|| env.get(API_URL_VAR))
        .unwrap_or(DEFAULT_API_URL)
        .to_string()
}

/// Per-request options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    /// The proxy to send requests through, or `None` for a direct connection.
    pub proxy: Option<ProxyHandle>,
    /// How long to wait for a request to complete.
    pub timeout: Duration,
}

/// Everything needed to talk to the GitHub API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The base URL of the API.
    pub base_url: Url,
    /// The API token.
    pub auth: String,
    /// Options for every request.
    pub request: RequestOptions,
}

static_assertions::assert_impl_all!(ClientConfig: Send, Sync);

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth", &"<redacted>")
            .field("request", &self.request)
            .finish()
    }
}

impl ClientConfig {
    /// Configure a client for `base_url` with the given `auth` token and `proxy`.
    ///
    /// Requests time out after [`REQUEST_TIMEOUT`].
    pub fn new<S: Into<String>>(base_url: Url, auth: S, proxy: Option<ProxyHandle>) -> Self {
        Self {
            base_url,
            auth: auth.into(),
            request: RequestOptions {
                proxy,
                timeout: REQUEST_TIMEOUT,
            },
        }
    }

    /// Build a blocking HTTP client from this configuration.
    ///
    /// The client sends the token and GitHub's JSON media type with every request.  If this
    /// configuration has a proxy, all requests go through it; otherwise the client connects
    /// directly and ignores any proxy settings in the environment.
    pub fn build_client(&self) -> Result<reqwest::blocking::Client> {
        let mut authorization = HeaderValue::from_str(&format!("token {}", self.auth))
            .map_err(|_| Error::InvalidToken)?;
        authorization.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let builder = reqwest::blocking::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .default_headers(headers)
            .timeout(self.request.timeout);
        let builder = match &self.request.proxy {
            Some(proxy) => builder.proxy(proxy.to_reqwest()?),
            None => builder.no_proxy(),
        };
        Ok(builder.build()?)
    }
}
