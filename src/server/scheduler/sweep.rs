//! Periodic pull of every live credential.

use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::server::{
    data::credential::CredentialRepository,
    error::Error,
    model::{app::AppState, db::CredentialModel},
    service::credential::CredentialService,
};

/// Counts of how each credential fared in one sweep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    /// Pulled and saved with a different type, mask, verification, violation or expiry
    pub updated: usize,
    /// Pulled with nothing but the timestamp changing, or skipped as a corporation key
    pub unchanged: usize,
    /// Rejected by the EVE API and deleted
    pub deleted: usize,
    /// Pull failed; the credential is left as it was
    pub failed: usize,
}

impl SweepSummary {
    /// Number of credentials the sweep looked at.
    pub fn total(&self) -> usize {
        self.updated + self.unchanged + self.deleted + self.failed
    }
}

/// Pulls every live credential, at most `concurrency` at a time.
///
/// A failing credential never stops the others.
pub struct CredentialSweep {
    state: AppState,
    concurrency: usize,
}

impl CredentialSweep {
    /// Creates a sweep pulling at most `concurrency` credentials at once; zero is raised to one.
    pub fn new(state: AppState, concurrency: usize) -> Self {
        Self {
            state,
            concurrency: concurrency.max(1),
        }
    }

    /// Runs one sweep over every live credential.
    ///
    /// Only failing to list the credentials is an error; per-credential failures are counted in the summary.
    pub async fn run(&self) -> Result<SweepSummary, Error> {
        let credentials = CredentialRepository::new(&self.state.db)
            .find_live(Utc::now().naive_utc())
            .await?;

        let service = CredentialService::new(
            &self.state.db,
            self.state.key_api.as_ref(),
            self.state.grant_sink.as_ref(),
            &self.state.policy,
        );

        let outcomes: Vec<(CredentialModel, Result<Option<CredentialModel>, Error>)> =
            stream::iter(credentials)
                .map(|credential| {
                    let service = &service;

                    async move {
                        let before = credential.clone();
                        let result = service.pull(credential).await;

                        (before, result)
                    }
                })
                .buffer_unordered(self.concurrency)
                .collect()
                .await;

        let mut summary = SweepSummary::default();
        for (before, result) in outcomes {
            match result {
                Ok(Some(after)) if pulled_fields_changed(&before, &after) => summary.updated += 1,
                Ok(Some(_)) => summary.unchanged += 1,
                Ok(None) => summary.deleted += 1,
                Err(e) => {
                    tracing::warn!(key = %before.key, "Sweep failed to pull key: {}", e);

                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            total = summary.total(),
            updated = summary.updated,
            unchanged = summary.unchanged,
            deleted = summary.deleted,
            failed = summary.failed,
            "Credential sweep finished"
        );

        Ok(summary)
    }
}

fn pulled_fields_changed(before: &CredentialModel, after: &CredentialModel) -> bool {
    before.kind != after.kind
        || before.mask != after.mask
        || before.verified != after.verified
        || before.violation != after.violation
        || before.expires != after.expires
}
