// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Run the report action.
//!
//! [`run`] reads the action inputs, resolves the API base URL and proxy, builds an HTTP client
//! and hands it to a [`ReportGenerator`] which fetches and renders the actual report.

use std::path::PathBuf;
use std::process::ExitCode;

use url::Url;

use crate::client::{api_base_url, ClientConfig};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::inputs::ActionInputs;
use crate::resolver::{parse_base_url, resolve};

/// The template to render reports with.
pub const SUMMARY_TEMPLATE: &str = "summary";

/// What report to generate, and where to put it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// The repository, as `owner/name`.
    pub repository: String,
    /// The git ref the analysis ran on.
    pub git_ref: String,
    /// The SARIF upload to report on, if any.
    pub sarif_report_id: Option<String>,
    /// The directory to write the report to.
    pub output_dir: PathBuf,
    /// The name of the template to render.
    pub template: String,
}

impl From<&ActionInputs> for ReportRequest {
    fn from(inputs: &ActionInputs) -> Self {
        Self {
            repository: inputs.repository.clone(),
            git_ref: inputs.git_ref.clone(),
            sarif_report_id: inputs.sarif_report_id.clone(),
            output_dir: inputs.output_dir.clone(),
            template: SUMMARY_TEMPLATE.to_string(),
        }
    }
}

/// Fetch a code scanning report and render it.
pub trait ReportGenerator {
    /// Generate the report described by `request`.
    ///
    /// `client` is configured for the API at `base_url`, including authentication, timeout and
    /// proxy.  Return the path of the rendered report.
    fn generate(
        &self,
        request: &ReportRequest,
        base_url: &Url,
        client: &reqwest::blocking::Client,
    ) -> std::result::Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>;
}

/// Run the report action with the inputs and proxy settings in `env`.
///
/// Return the path of the rendered report.
pub fn run<G: ReportGenerator + ?Sized>(env: &Environment, generator: &G) -> Result<PathBuf> {
    let inputs = ActionInputs::from_env(env)?;
    let base_url = api_base_url(None, env);
    let proxy = resolve(&base_url, inputs.https_proxy.as_deref(), env)?;
    let base_url = parse_base_url(&base_url)?;
    let config = ClientConfig::new(base_url, inputs.token.as_str(), proxy);
    log::debug!("Client configuration: {:?}", config);
    let client = config.build_client()?;
    generator
        .generate(&ReportRequest::from(&inputs), &config.base_url, &client)
        .map_err(Error::Report)
}

/// Print the outcome of `result` in the format of GitHub Actions workflow commands.
///
/// Print the path of the report on success, or an `::error::` command on failure, and return the
/// corresponding exit code.
pub fn report_outcome(result: &Result<PathBuf>) -> ExitCode {
    match result {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            log::error!("Report action failed: {}", error);
            println!("{}", error_command(error));
            ExitCode::FAILURE
        }
    }
}

/// Run the report action and report its outcome, see [`run`] and [`report_outcome`].
pub fn run_and_report<G>(env: &Environment, generator: &G) -> ExitCode
where
    G: ReportGenerator + ?Sized,
{
    report_outcome(&run(env, generator))
}

/// Format `error` as `::error::` workflow command.
pub fn error_command(error: &Error) -> String {
    format!("::error::{}", escape_data(&error.to_string()))
}

/// Escape `message` as workflow command data.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
