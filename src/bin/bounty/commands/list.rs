//! List command - available and unposted bounties

use crate::style::*;
use anyhow::Result;
use bounty_client::BountyClient;

pub async fn run(client: &BountyClient, unposted_only: bool) -> Result<()> {
    let bounties = if unposted_only {
        print_header("Unposted Bounties");
        client.try_unposted_bounties().await?
    } else {
        print_header("Available Bounties");
        client.try_fetch_available_bounties().await?
    };

    if bounties.is_empty() {
        print_info("No bounties available right now.");
        return Ok(());
    }

    print_bounty_table(&bounties);
    Ok(())
}
