//! Config command - show effective client configuration

use crate::style::*;
use anyhow::Result;
use bounty_client::config::{Config, API_BASE_URL_ENV};

pub fn run(config: &Config) -> Result<()> {
    print_header("Client Configuration");

    println!();
    println!("API base URL:     {}", style_cyan(&config.api.base_url));
    println!("Request timeout:  {}s", config.api.request_timeout_secs);
    println!("Fetch cooldown:   {}s", config.cooldown.fetch_cooldown_secs);

    println!();
    println!("{}", style_bold("Endpoints:"));
    println!("  GET   {}/bounties?filled=false&status=active", config.api.base_url);
    println!("  POST  {}/bounties", config.api.base_url);
    println!("  GET   {}/bounties/{{id}}", config.api.base_url);
    println!("  PATCH {}/bounties/{{id}}", config.api.base_url);

    println!();
    println!(
        "{}",
        style_dim(&format!("Set {} to point at another API.", API_BASE_URL_ENV))
    );

    Ok(())
}
