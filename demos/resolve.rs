// Copyright (c) 2022 Sebastian Wiesner <sebastian@swsnr.de>
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Show which proxy the current environment selects for the GitHub API, and query the API
//! through it.
//!
//! Pass an explicit proxy as first argument to override the environment.

use scan_report_proxy::client::{api_base_url, ClientConfig};
use scan_report_proxy::env::Environment;
use scan_report_proxy::resolver::{decide, parse_base_url, ProxyDecision};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let explicit_proxy = std::env::args().nth(1);
    let env = Environment::from_process();
    let base_url = api_base_url(None, &env);

    let decision = decide(&base_url, explicit_proxy.as_deref(), &env)?;
    match (&decision, decision.handle()) {
        (ProxyDecision::Excluded, _) => {
            println!("{} excluded from proxy, connecting directly", base_url)
        }
        (_, Some(proxy)) => println!("Using proxy {}", proxy.url()),
        (_, None) => println!("No proxy configured, connecting directly"),
    }

    let token = env.get("GITHUB_TOKEN").unwrap_or_default();
    let config = ClientConfig::new(parse_base_url(&base_url)?, token, decision.into_handle());
    let client = config.build_client()?;
    let response = client.get(config.base_url.join("rate_limit")?).send()?;
    println!("Status code: {}", response.status());
    Ok(())
}
