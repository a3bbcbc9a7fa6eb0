// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hosts which must never be reached through a proxy.
//!
//! Unlike curl this module only understands exact host names: `.example.com` does not match
//! subdomains of `example.com`, `*` does not match everything, and ports are part of the
//! comparison, i.e. `ghe.example.com` does not exclude `https://ghe.example.com:8443`.

use url::Url;

use crate::error::{Error, Result};

/// The host portion of `url`.
///
/// This is the host of `url`, followed by `:` and the port if `url` has an explicit port which is
/// not the default port of its scheme.  IPv6 addresses keep their enclosing brackets.
///
/// Return [`Error::MissingHost`] if `url` has no host.
pub fn host_portion(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| Error::MissingHost(url.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// A list of hosts to connect to directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoProxyHosts(Vec<String>);

static_assertions::assert_impl_all!(NoProxyHosts: Send, Sync);

impl NoProxyHosts {
    /// Parse a `$no_proxy` value.
    ///
    /// Split `value` at `,` and trim whitespace around every entry.  Empty entries, e.g. from a
    /// trailing comma, are kept; they never match a host.
    pub fn parse<S: AsRef<str>>(value: S) -> Self {
        Self(
            value
                .as_ref()
                .split(',')
                .map(|host| host.trim().to_string())
                .collect(),
        )
    }

    /// The hosts in this list, in order.
    pub fn hosts(&self) -> &[String] {
        &self.0
    }

    /// Whether `host` appears verbatim in this list.
    pub fn excludes_host(&self, host: &str) -> bool {
        self.0.iter().any(|candidate| candidate == host)
    }

    /// Whether the host portion of `url` appears verbatim in this list.
    ///
    /// See [`host_portion`] for what is compared.
    pub fn excludes(&self, url: &Url) -> Result<bool> {
        let host = host_portion(url)?;
        log::debug!("no_proxy hosts = {:?}", self.hosts());
        log::debug!("base URL host = {}", host);
        Ok(self.excludes_host(&host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn parse_trims_entries() {
        assert_eq!(
            NoProxyHosts::parse(" api.github.com , foo.com"),
            NoProxyHosts(vec!["api.github.com".into(), "foo.com".into()])
        );
    }

    #[test]
    fn hosts_in_order() {
        assert_eq!(
            NoProxyHosts::parse("foo.com , example.com").hosts().to_vec(),
            vec!["foo.com".to_string(), "example.com".to_string()]
        );
        assert!(NoProxyHosts::default().hosts().is_empty());
    }

    #[test]
    fn parse_keeps_empty_entries() {
        assert_eq!(
            NoProxyHosts::parse("example.com,, "),
            NoProxyHosts(vec!["example.com".into(), "".into(), "".into()])
        );
    }

    #[test]
    fn host_portion_strips_scheme_and_path() {
        assert_eq!(
            host_portion(&url("https://api.github.com/repos/foo")).unwrap(),
            "api.github.com"
        );
    }

    #[test]
    fn host_portion_keeps_explicit_port() {
        assert_eq!(
            host_portion(&url("https://ghe.example.com:8443/api/v3")).unwrap(),
            "ghe.example.com:8443"
        );
        assert_eq!(
            host_portion(&url("https://ghe.example.com:443/api/v3")).unwrap(),
            "ghe.example.com"
        );
    }

    #[test]
    fn host_portion_ipv6() {
        assert_eq!(
            host_portion(&url("http://[fe80::2ead:fea3:1423:6637]/foo")).unwrap(),
            "[fe80::2ead:fea3:1423:6637]"
        );
    }

    #[test]
    fn host_portion_without_host() {
        let error = host_portion(&url("mailto:octocat@github.com")).unwrap_err();
        assert!(matches!(error, Error::MissingHost(_)), "{error:?}");
    }

    #[test]
    fn excludes_exact_match_only() {
        let hosts = NoProxyHosts::parse("example.com, api.github.com");
        assert!(hosts.excludes(&url("https://api.github.com")).unwrap());
        assert!(hosts.excludes(&url("http://example.com/foo")).unwrap());
        assert!(!hosts.excludes(&url("https://other.github.com")).unwrap());
        assert!(!hosts.excludes(&url("https://foo.example.com")).unwrap());
    }

    #[test]
    fn excludes_no_suffix_or_wildcard_rules() {
        let hosts = NoProxyHosts::parse(".github.com,*");
        assert!(!hosts.excludes(&url("https://api.github.com")).unwrap());
        assert!(!hosts.excludes(&url("https://github.com")).unwrap());
    }

    #[test]
    fn excludes_compares_ports() {
        let hosts = NoProxyHosts::parse("ghe.example.com");
        assert!(!hosts.excludes(&url("https://ghe.example.com:8443")).unwrap());

        let hosts = NoProxyHosts::parse("ghe.example.com:8443");
        assert!(hosts.excludes(&url("https://ghe.example.com:8443")).unwrap());
    }

    #[test]
    fn empty_entries_never_match() {
        let hosts = NoProxyHosts::parse(",");
        assert!(!hosts.excludes_host("github.com"));
        assert!(!hosts.excludes(&url("https://github.com")).unwrap());
    }
}
