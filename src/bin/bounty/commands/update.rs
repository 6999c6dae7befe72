//! Update command - patch fields of an existing bounty

use crate::style::*;
use anyhow::{bail, Context, Result};
use bounty_client::{BountyClient, BountyPatch};
use chrono::{DateTime, Utc};
use clap::Args;

#[derive(Args, Debug, Default)]
pub struct UpdateArgs {
    /// Bounty ID
    pub id: String,

    #[arg(short, long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(long)]
    pub value: Option<f64>,

    #[arg(long)]
    pub status: Option<String>,

    /// ID of the tweet announcing the bounty
    #[arg(long)]
    pub tweet_id: Option<String>,

    /// Replace tags, comma separated or repeated
    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    #[arg(long)]
    pub requirements: Option<String>,

    /// Deadline as RFC 3339
    #[arg(long)]
    pub deadline: Option<DateTime<Utc>>,
}

impl UpdateArgs {
    fn into_patch(self) -> (String, BountyPatch) {
        let patch = BountyPatch {
            title: self.title,
            description: self.description,
            value: self.value,
            status: self.status,
            tweet_id: self.tweet_id,
            tags: self.tags,
            requirements: self.requirements,
            deadline: self.deadline,
            ..Default::default()
        };
        (self.id, patch)
    }
}

pub async fn run(client: &BountyClient, args: UpdateArgs) -> Result<()> {
    let (id, patch) = args.into_patch();
    if patch.is_empty() {
        bail!("Nothing to update, pass at least one field");
    }

    let bounty = client
        .try_update_bounty(&id, patch)
        .await
        .with_context(|| format!("Failed to update bounty {}", id))?;

    print_success(&format!("Updated bounty {}", style_cyan(&bounty.id)));
    print_bounty(&bounty);
    Ok(())
}
