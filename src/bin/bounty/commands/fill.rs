//! Fill command - mark a bounty as claimed

use crate::style::*;
use anyhow::{Context, Result};
use bounty_client::BountyClient;

pub async fn run(client: &BountyClient, id: &str, user_id: &str) -> Result<()> {
    let bounty = client
        .try_mark_filled(id, user_id)
        .await
        .with_context(|| format!("Failed to mark bounty {} as filled", id))?;

    print_success(&format!(
        "Bounty {} filled by {}",
        style_cyan(&bounty.id),
        style_bold(user_id)
    ));
    Ok(())
}
