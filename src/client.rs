//! Bounty client
//!
//! Wraps a [`BountyApi`] with input validation, response filtering and a
//! cooldown on the listing endpoint.
//!
//! Every operation comes in two forms:
//! - `try_*` returns a [`Result`] that keeps the error kind
//! - the plain form logs the failure and returns an empty list or `None`

use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::{BountyApi, HttpBountyApi, ListQuery};
use crate::bounty::{Bounty, BountyPatch, STATUS_ACTIVE};
use crate::config::Config;
use crate::error::{BountyError, Result};

pub struct BountyClient<A = HttpBountyApi> {
    api: A,
    fetch_cooldown: Duration,
    /// Start of the last listing attempt
    last_fetch: Mutex<Option<Instant>>,
}

impl BountyClient<HttpBountyApi> {
    /// Client for the base URL in `API_BASE_URL`, or the local default
    pub fn from_env() -> Self {
        Self::from_config(&Config::from_env())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_api(HttpBountyApi::from_config(config), config.fetch_cooldown())
    }
}

impl<A: BountyApi> BountyClient<A> {
    pub fn with_api(api: A, fetch_cooldown: Duration) -> Self {
        Self {
            api,
            fetch_cooldown,
            last_fetch: Mutex::new(None),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn fetch_cooldown(&self) -> Duration {
        self.fetch_cooldown
    }

    /// Claim the listing slot, or report how long until it frees up.
    ///
    /// The slot is taken before the request is sent, so a failed request
    /// still holds it for the full window.
    fn reserve_fetch(&self) -> Result<()> {
        let now = Instant::now();
        let mut last_fetch = self.last_fetch.lock();

        if let Some(last) = *last_fetch {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < self.fetch_cooldown {
                return Err(BountyError::CoolingDown {
                    remaining: self.fetch_cooldown - elapsed,
                });
            }
        }

        *last_fetch = Some(now);
        Ok(())
    }

    /// Time left before the next listing request is allowed
    pub fn cooldown_remaining(&self) -> Duration {
        match *self.last_fetch.lock() {
            Some(last) => self.fetch_cooldown.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Forget the last listing attempt so the next call goes out immediately
    pub fn reset_cooldown(&self) {
        *self.last_fetch.lock() = None;
    }

    // ========================================================================
    // LISTING
    // ========================================================================

    pub async fn try_fetch_available_bounties(&self) -> Result<Vec<Bounty>> {
        self.reserve_fetch()?;

        let payload = self.api.list_bounties(&ListQuery::open()).await?;
        let entries = match payload {
            Value::Array(entries) => entries,
            other => {
                return Err(BountyError::MalformedResponse(format!(
                    "expected an array of bounties, got {}",
                    json_kind(&other)
                )))
            }
        };

        let total = entries.len();
        let now = Utc::now();
        let bounties: Vec<Bounty> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Bounty>(entry) {
                Ok(bounty) => Some(bounty),
                Err(e) => {
                    warn!("Skipping undecodable bounty entry: {}", e);
                    None
                }
            })
            .filter(|bounty| bounty.is_available_at(now))
            .collect();

        debug!("Fetched {} bounties, {} available", total, bounties.len());
        Ok(bounties)
    }

    /// Available bounties, or empty on cooldown or any failure
    pub async fn fetch_available_bounties(&self) -> Vec<Bounty> {
        match self.try_fetch_available_bounties().await {
            Ok(bounties) => bounties,
            Err(BountyError::CoolingDown { remaining }) => {
                info!(
                    "Skipping bounty fetch due to cooldown ({}s left)",
                    remaining.as_secs()
                );
                Vec::new()
            }
            Err(e) => {
                warn!("Error fetching bounties: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn try_unposted_bounties(&self) -> Result<Vec<Bounty>> {
        let bounties = self.try_fetch_available_bounties().await?;
        Ok(bounties.into_iter().filter(Bounty::is_unposted).collect())
    }

    /// Available bounties that have not been announced yet
    pub async fn unposted_bounties(&self) -> Vec<Bounty> {
        self.fetch_available_bounties()
            .await
            .into_iter()
            .filter(Bounty::is_unposted)
            .collect()
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    pub async fn try_create_bounty(&self, bounty: BountyPatch) -> Result<Bounty> {
        let missing = bounty.missing_required_fields();
        if !missing.is_empty() {
            return Err(BountyError::Validation(format!(
                "missing required bounty fields: {}",
                missing.join(", ")
            )));
        }

        let payload = BountyPatch {
            status: bounty.status.clone().or_else(|| Some(STATUS_ACTIVE.to_string())),
            created_at: Some(Utc::now()),
            ..bounty
        };

        let created = self.api.create_bounty(&payload).await?;
        info!("Created bounty {} ({})", created.id, created.title);
        Ok(created)
    }

    pub async fn create_bounty(&self, bounty: BountyPatch) -> Option<Bounty> {
        self.try_create_bounty(bounty)
            .await
            .map_err(|e| warn!("Error posting bounty: {}", e))
            .ok()
    }

    pub async fn try_update_bounty(&self, id: &str, update: BountyPatch) -> Result<Bounty> {
        let id = require_id(id)?;

        let patch = BountyPatch {
            updated_at: Some(Utc::now()),
            ..update
        };

        let updated = self.api.update_bounty(id, &patch).await?;
        debug!("Updated bounty {}", updated.id);
        Ok(updated)
    }

    pub async fn update_bounty(&self, id: &str, update: BountyPatch) -> Option<Bounty> {
        self.try_update_bounty(id, update)
            .await
            .map_err(|e| warn!("Error updating bounty {}: {}", id, e))
            .ok()
    }

    pub async fn try_get_bounty(&self, id: &str) -> Result<Bounty> {
        let id = require_id(id)?;
        self.api.get_bounty(id).await
    }

    pub async fn get_bounty(&self, id: &str) -> Option<Bounty> {
        self.try_get_bounty(id)
            .await
            .map_err(|e| warn!("Error fetching bounty {}: {}", id, e))
            .ok()
    }

    /// Claim a bounty: sets the filling user, the fill time and status "filled"
    pub async fn try_mark_filled(&self, id: &str, filling_user_id: &str) -> Result<Bounty> {
        if filling_user_id.trim().is_empty() {
            return Err(BountyError::Validation(
                "filling user ID is required".to_string(),
            ));
        }

        let bounty = self
            .try_update_bounty(id, BountyPatch::filled_by(filling_user_id, Utc::now()))
            .await?;
        info!("Bounty {} filled by {}", bounty.id, filling_user_id);
        Ok(bounty)
    }

    pub async fn mark_filled(&self, id: &str, filling_user_id: &str) -> Option<Bounty> {
        self.try_mark_filled(id, filling_user_id)
            .await
            .map_err(|e| warn!("Error marking bounty {} as filled: {}", id, e))
            .ok()
    }
}

fn require_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        Err(BountyError::Validation("bounty ID is required".to_string()))
    } else {
        Ok(id)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
