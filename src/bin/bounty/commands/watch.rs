//! Watch command - poll for unposted bounties

use std::collections::HashSet;
use std::time::Duration;

use crate::style::*;
use anyhow::Result;
use bounty_client::{BountyClient, BountyError};
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{debug, error};

/// Added to the cooldown so a tick never lands just inside the window
const COOLDOWN_SLACK: Duration = Duration::from_secs(1);

const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Explicit interval if given, otherwise just past the fetch cooldown
fn poll_period(interval_secs: Option<u64>, cooldown: Duration) -> Duration {
    interval_secs
        .map(Duration::from_secs)
        .unwrap_or(cooldown + COOLDOWN_SLACK)
        .max(MIN_PERIOD)
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

pub async fn run(client: &BountyClient, interval_secs: Option<u64>) -> Result<()> {
    let period = poll_period(interval_secs, client.fetch_cooldown());

    print_header("Watching for unposted bounties");
    print_info(&format!("Checking every {}s, Ctrl+C to stop", period.as_secs()));

    let mut seen: HashSet<String> = HashSet::new();
    let mut ticker = ticker(period);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                println!();
                print_info("Stopped.");
                return Ok(());
            }
        }

        match client.try_unposted_bounties().await {
            Ok(bounties) => {
                let fresh: Vec<_> = bounties
                    .into_iter()
                    .filter(|b| seen.insert(b.id.clone()))
                    .collect();

                if fresh.is_empty() {
                    debug!("No new unposted bounties");
                } else {
                    print_success(&format!("{} new unposted bounties", fresh.len()));
                    print_bounty_table(&fresh);
                }
            }
            Err(BountyError::CoolingDown { remaining }) => {
                debug!("Cooldown active, {}s left", remaining.as_secs());
            }
            Err(e) => {
                error!("Bounty check failed: {}", e);
                print_warning(&format!("Check failed: {}", e));
            }
        }
    }
}
