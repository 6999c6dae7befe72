//! Create command - post a new bounty

use crate::style::*;
use anyhow::{Context, Result};
use bounty_client::{BountyClient, BountyPatch};
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Short title
    #[arg(short, long)]
    pub title: String,

    /// What needs to be done
    #[arg(short, long)]
    pub description: String,

    /// Reward value, must be greater than zero
    #[arg(long)]
    pub value: f64,

    /// Tags, comma separated or repeated
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Extra requirements for claimants
    #[arg(long)]
    pub requirements: Option<String>,

    /// Deadline as RFC 3339, e.g. 2026-12-31T23:59:59Z
    #[arg(long)]
    pub deadline: Option<DateTime<Utc>>,

    /// Username of the bounty author
    #[arg(short, long, env = "BOUNTY_USERNAME")]
    pub username: Option<String>,

    /// Bounty score
    #[arg(long)]
    pub score: Option<f64>,
}

impl From<CreateArgs> for BountyPatch {
    fn from(args: CreateArgs) -> Self {
        Self {
            tags: (!args.tags.is_empty()).then_some(args.tags),
            requirements: args.requirements,
            deadline: args.deadline,
            creating_username: args.username,
            bounty_score: args.score,
            ..BountyPatch::new(args.title, args.description, args.value)
        }
    }
}

pub async fn run(client: &BountyClient, args: CreateArgs) -> Result<()> {
    let bounty = client
        .try_create_bounty(args.into())
        .await
        .context("Failed to create bounty")?;

    print_success(&format!("Created bounty {}", style_cyan(&bounty.id)));
    print_bounty(&bounty);
    Ok(())
}
