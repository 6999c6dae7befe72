//! Bounty Client - Fetch, create and update bounties on a remote bounty API
//!
//! A thin typed client over the bounty REST API. It validates inputs before
//! sending them, filters listings down to bounties that can still be taken,
//! and throttles listing requests with a cooldown.
//!
//! # Operations
//!
//! 1. List available bounties (unfilled, active, with a future or no deadline)
//! 2. List unposted bounties (available and not yet announced)
//! 3. Create a bounty (status defaults to "active")
//! 4. Update a bounty with a partial patch
//! 5. Fetch a bounty by ID
//! 6. Mark a bounty as filled by a user
//!
//! # Failure handling
//!
//! - `try_*` methods return [`BountyError`] with the failure kind
//! - Plain methods log the failure and return an empty list or `None`
//! - A listing within the cooldown window never reaches the network

pub mod api;
pub mod bounty;
pub mod client;
pub mod config;
pub mod error;

pub use api::{BountyApi, HttpBountyApi, ListQuery};
pub use bounty::{Bounty, BountyPatch, STATUS_ACTIVE, STATUS_FILLED};
pub use client::BountyClient;
pub use config::Config;
pub use error::{BountyError, Result};
