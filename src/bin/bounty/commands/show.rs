//! Show command - display one bounty

use crate::style::*;
use anyhow::Result;
use bounty_client::{BountyClient, BountyError};

pub async fn run(client: &BountyClient, id: &str) -> Result<()> {
    match client.try_get_bounty(id).await {
        Ok(bounty) => {
            print_header("Bounty");
            print_bounty(&bounty);
            if bounty.is_filled() {
                println!();
                print_warning("This bounty has already been filled.");
            }
            Ok(())
        }
        Err(BountyError::NotFound(id)) => {
            print_warning(&format!("No bounty with ID {}", style_bold(&id)));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
