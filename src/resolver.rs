// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Decide whether API calls go through a proxy.
//!
//! [`decide`] looks at an explicit proxy first; if there is none it takes the first non-empty
//! variable of [`PROXY_VARS`] and then checks the base URL against the hosts in the first
//! non-empty variable of [`NO_PROXY_VARS`].  The same proxy is used for all schemes, i.e.
//! `$http_proxy` also applies to `https:` base URLs.

use url::Url;

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::noproxy::NoProxyHosts;

/// Variables holding the environment proxy, in order of precedence.
pub const PROXY_VARS: [&str; 4] = ["http_proxy", "HTTP_PROXY", "https_proxy", "HTTPS_PROXY"];

/// Variables holding hosts to exclude from the environment proxy, in order of precedence.
pub const NO_PROXY_VARS: [&str; 2] = ["no_proxy", "NO_PROXY"];

/// A proxy to route requests through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyHandle {
    url: Url,
}

static_assertions::assert_impl_all!(ProxyHandle: Send, Sync);

impl ProxyHandle {
    /// Use the proxy at `url`.
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse `value` as proxy URL; `origin` describes where `value` came from, for errors.
    ///
    /// Like curl, assume `http://` if `value` has no scheme, e.g. `corp-proxy:3128`.  Fail if the
    /// URL has no host.
    fn parse(origin: &str, value: &str) -> Result<Self> {
        let invalid = |source| Error::InvalidProxyUrl {
            origin: origin.to_string(),
            value: value.to_string(),
            source,
        };
        let url = if value.contains("://") {
            Url::parse(value)
        } else {
            Url::parse(&format!("http://{value}"))
        }
        .map_err(invalid)?;
        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(Self::new(url)),
            _ => Err(invalid(url::ParseError::EmptyHost)),
        }
    }

    /// The URL of the proxy.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// A reqwest proxy which sends all traffic through this proxy.
    pub fn to_reqwest(&self) -> reqwest::Result<reqwest::Proxy> {
        reqwest::Proxy::all(self.url.clone())
    }
}

/// How API calls get routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyDecision {
    /// Use the proxy given explicitly by the caller.
    Explicit(ProxyHandle),
    /// Use the proxy from the environment.
    Environment(ProxyHandle),
    /// Connect directly, because there is no proxy at all.
    Direct,
    /// Connect directly, because the base URL is excluded from the environment proxy.
    Excluded,
}

static_assertions::assert_impl_all!(ProxyDecision: Send, Sync);

impl ProxyDecision {
    /// The proxy to use, if any.
    pub fn handle(&self) -> Option<&ProxyHandle> {
        match self {
            Self::Explicit(handle) | Self::Environment(handle) => Some(handle),
            Self::Direct | Self::Excluded => None,
        }
    }

    /// Turn this decision into the proxy to use, if any.
    pub fn into_handle(self) -> Option<ProxyHandle> {
        match self {
            Self::Explicit(handle) | Self::Environment(handle) => Some(handle),
            Self::Direct | Self::Excluded => None,
        }
    }
}

/// Parse `base_url` and make sure it has a host.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|source| Error::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    crate::noproxy::host_portion(&url)?;
    Ok(url)
}

/// Decide how to route API calls to `base_url`.
///
/// A non-empty `explicit_proxy` always wins, regardless of `env`.  Otherwise use the first
/// non-empty variable of [`PROXY_VARS`] in `env`, unless the host portion of `base_url` (see
/// [`crate::noproxy::host_portion`]) appears in the first non-empty variable of
/// [`NO_PROXY_VARS`].
///
/// Fail if `base_url` is not a URL with a host, or if the proxy to use is not a URL with a host.
/// An environment proxy which is excluded for `base_url` is never parsed.
pub fn decide(
    base_url: &str,
    explicit_proxy: Option<&str>,
    env: &Environment,
) -> Result<ProxyDecision> {
    let base_url = parse_base_url(base_url)?;

    if let Some(proxy) = explicit_proxy.filter(|proxy| !proxy.is_empty()) {
        log::info!("explicit proxy specified as '{}'", proxy);
        return ProxyHandle::parse("explicit proxy", proxy).map(ProxyDecision::Explicit);
    }

    let (proxy_var, proxy) = match env.first_of(&PROXY_VARS) {
        Some(found) => found,
        None => {
            log::debug!("no proxy in environment, connecting directly to {}", base_url);
            return Ok(ProxyDecision::Direct);
        }
    };
    log::info!("environment proxy specified as '{}' in ${}", proxy, proxy_var);

    if let Some((no_proxy_var, no_proxy)) = env.first_of(&NO_PROXY_VARS) {
        log::info!("environment no_proxy set as '{}' in ${}", no_proxy, no_proxy_var);
        if NoProxyHosts::parse(no_proxy).excludes(&base_url)? {
            log::info!("environment proxy excluded from no_proxy settings");
            return Ok(ProxyDecision::Excluded);
        }
    }

    let handle = ProxyHandle::parse(&format!("${proxy_var}"), proxy)?;
    log::info!("using proxy '{}' for GitHub API calls", handle.url());
    Ok(ProxyDecision::Environment(handle))
}

/// Resolve the proxy for API calls to `base_url`, if any.
///
/// See [`decide`] for details.
pub fn resolve(
    base_url: &str,
    explicit_proxy: Option<&str>,
    env: &Environment,
) -> Result<Option<ProxyHandle>> {
    decide(base_url, explicit_proxy, env).map(ProxyDecision::into_handle)
}
