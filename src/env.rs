// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Snapshots of environment variables.
//!
//! Everything in this crate which depends on environment variables takes an [`Environment`]
//! instead of reading the process environment directly.  Take a snapshot of the process
//! environment with [`Environment::from_process()`], or build one from name/value pairs in tests:
//!
//! ```
//! use scan_report_proxy::env::Environment;
//!
//! let env: Environment = [("HTTPS_PROXY", "http://corp-proxy:3128")].into_iter().collect();
//! assert_eq!(env.get("HTTPS_PROXY"), Some("http://corp-proxy:3128"));
//! ```

use std::collections::HashMap;

/// An immutable snapshot of environment variables.
///
/// Empty values are treated exactly like unset variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

static_assertions::assert_impl_all!(Environment: Send, Sync);

impl Environment {
    /// An environment without any variables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Take a snapshot of the environment of the current process.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(name, value)| match (name.into_string(), value.into_string()) {
                (Ok(name), Ok(value)) => Some((name, value)),
                (Ok(name), Err(_)) => {
                    log::warn!("Variable ${} does not contain valid unicode, skipping", name);
                    None
                }
                (Err(name), _) => {
                    log::warn!("Variable name {:?} is not valid unicode, skipping", name);
                    None
                }
            })
            .collect()
    }

    /// Get the value of the variable `name`.
    ///
    /// Return `None` if the variable is unset or empty.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Get the first of `names` which has a non-empty value.
    ///
    /// Return the name of the variable together with its value, or `None` if all of `names` are
    /// unset or empty.  Variables are never combined.
    pub fn first_of<'n>(&self, names: &[&'n str]) -> Option<(&'n str, &str)> {
        names
            .iter()
            .find_map(|name| self.get(name).map(|value| (*name, value)))
    }

    /// Set `name` to `value` in this snapshot.
    pub fn set<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.vars.insert(name.into(), value.into());
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Environment {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut env = Self::empty();
        env.extend(iter);
        env
    }
}

impl<N: Into<String>, V: Into<String>> Extend<(N, V)> for Environment {
    fn extend<T: IntoIterator<Item = (N, V)>>(&mut self, iter: T) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn get_treats_empty_as_unset() {
        let env: Environment = [("http_proxy", ""), ("HTTP_PROXY", "http://proxy:8080")]
            .into_iter()
            .collect();
        assert_eq!(env.get("http_proxy"), None);
        assert_eq!(env.get("HTTP_PROXY"), Some("http://proxy:8080"));
        assert_eq!(env.get("https_proxy"), None);
    }

    #[test]
    fn first_of_respects_order() {
        let env: Environment = [
            ("HTTPS_PROXY", "http://upper:1234"),
            ("https_proxy", "http://lower:1234"),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            env.first_of(&["https_proxy", "HTTPS_PROXY"]),
            Some(("https_proxy", "http://lower:1234"))
        );
        assert_eq!(
            env.first_of(&["HTTPS_PROXY", "https_proxy"]),
            Some(("HTTPS_PROXY", "http://upper:1234"))
        );
    }

    #[test]
    fn first_of_skips_empty() {
        let env: Environment = [("no_proxy", ""), ("NO_PROXY", "example.com")]
            .into_iter()
            .collect();
        assert_eq!(
            env.first_of(&["no_proxy", "NO_PROXY"]),
            Some(("NO_PROXY", "example.com"))
        );
        assert_eq!(Environment::empty().first_of(&["no_proxy", "NO_PROXY"]), None);
    }

    #[test]
    fn from_process_snapshot() {
        temp_env::with_vars(
            vec![
                ("SCAN_REPORT_PROXY_TEST_SET", Some("value")),
                ("SCAN_REPORT_PROXY_TEST_UNSET", None),
            ],
            || {
                let env = Environment::from_process();
                assert_eq!(env.get("SCAN_REPORT_PROXY_TEST_SET"), Some("value"));
                assert_eq!(env.get("SCAN_REPORT_PROXY_TEST_UNSET"), None);
            },
        )
    }
}
