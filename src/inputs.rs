// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Inputs of the report action.
//!
//! GitHub Actions passes the input `name` in `$INPUT_<NAME>`, with spaces in `name` replaced by
//! `_` and all letters upper-cased.

use std::path::PathBuf;

use crate::env::Environment;
use crate::error::{Error, Result};

/// The variable holding the input `name`.
pub fn input_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Get the input `name`, with surrounding whitespace removed.
///
/// Return `None` if the input is unset or blank.
pub fn get_input(env: &Environment, name: &str) -> Option<String> {
    env.get(&input_var(name))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

/// Get the required input `name`.
///
/// Fail with [`Error::MissingInput`] if the input is unset or blank.
pub fn get_required_input(env: &Environment, name: &str) -> Result<String> {
    get_input(env, name).ok_or_else(|| Error::MissingInput(name.to_string()))
}

/// All inputs of the report action.
#[derive(Clone, PartialEq, Eq)]
pub struct ActionInputs {
    /// The token for the GitHub API.
    pub token: String,
    /// The repository to report on, as `owner/name`.
    pub repository: String,
    /// The git ref the analysis ran on.
    pub git_ref: String,
    /// The ID of the SARIF upload, if the report covers a single upload.
    pub sarif_report_id: Option<String>,
    /// A proxy to use regardless of the environment.
    pub https_proxy: Option<String>,
    /// Where to write the rendered report.
    pub output_dir: PathBuf,
}

static_assertions::assert_impl_all!(ActionInputs: Send, Sync);

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("token", &"<redacted>")
            .field("repository", &self.repository)
            .field("git_ref", &self.git_ref)
            .field("sarif_report_id", &self.sarif_report_id)
            .field("https_proxy", &self.https_proxy)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl ActionInputs {
    /// Read all inputs from `env`.
    ///
    /// `token`, `repository`, `ref` and `outputDir` are required.
    pub fn from_env(env: &Environment) -> Result<Self> {
        Ok(Self {
            token: get_required_input(env, "token")?,
            repository: get_required_input(env, "repository")?,
            git_ref: get_required_input(env, "ref")?,
            sarif_report_id: get_input(env, "sarif_report_id"),
            https_proxy: get_input(env, "https_proxy"),
            output_dir: get_required_input(env, "outputDir")?.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn complete() -> Environment {
        [
            ("INPUT_TOKEN", "s3cr3t"),
            ("INPUT_REPOSITORY", "octo-org/octo-repo"),
            ("INPUT_REF", "refs/heads/main"),
            ("INPUT_OUTPUTDIR", " reports "),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn input_var_names() {
        assert_eq!(input_var("token"), "INPUT_TOKEN");
        assert_eq!(input_var("outputDir"), "INPUT_OUTPUTDIR");
        assert_eq!(input_var("sarif report id"), "INPUT_SARIF_REPORT_ID");
    }

    #[test]
    fn from_env_required_only() {
        assert_eq!(
            ActionInputs::from_env(&complete()).unwrap(),
            ActionInputs {
                token: "s3cr3t".into(),
                repository: "octo-org/octo-repo".into(),
                git_ref: "refs/heads/main".into(),
                sarif_report_id: None,
                https_proxy: None,
                output_dir: PathBuf::from("reports"),
            }
        );
    }

    #[test]
    fn from_env_optional_inputs() {
        let mut env = complete();
        env.set("INPUT_SARIF_REPORT_ID", "42");
        env.set("INPUT_HTTPS_PROXY", "http://proxy.local:8080");
        let inputs = ActionInputs::from_env(&env).unwrap();
        assert_eq!(inputs.sarif_report_id.as_deref(), Some("42"));
        assert_eq!(inputs.https_proxy.as_deref(), Some("http://proxy.local:8080"));
    }

    #[test]
    fn blank_optional_input_is_absent() {
        let mut env = complete();
        env.set("INPUT_HTTPS_PROXY", "   ");
        assert_eq!(ActionInputs::from_env(&env).unwrap().https_proxy, None);
    }

    #[test]
    fn missing_required_input() {
        for var in ["INPUT_TOKEN", "INPUT_REPOSITORY", "INPUT_REF", "INPUT_OUTPUTDIR"] {
            let mut env = complete();
            env.set(var, "");
            match ActionInputs::from_env(&env).unwrap_err() {
                Error::MissingInput(name) => assert_eq!(input_var(&name), var),
                other => panic!("Unexpected error for {var}: {other:?}"),
            }
        }
    }

    #[test]
    fn debug_redacts_token() {
        let debug = format!("{:?}", ActionInputs::from_env(&complete()).unwrap());
        assert!(!debug.contains("s3cr3t"), "{debug}");
    }
}
