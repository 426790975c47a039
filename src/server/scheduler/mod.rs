//! Scheduler for periodic credential maintenance.
//!
//! Two cron jobs keep stored keys in line with the EVE API: the sweep pulls every live
//! credential, and the purge deletes credentials whose expiry has passed through the same
//! detach cascade as a revoked key.

use std::sync::Arc;

use chrono::Utc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error, model::app::AppState, service::credential::CredentialService,
};

pub mod config;
pub mod sweep;

use self::config::{purge as purge_config, sweep as sweep_config};
use self::sweep::CredentialSweep;

/// Job scheduler for background credential maintenance.
pub struct Scheduler {
    state: AppState,
    sweep_concurrency: usize,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `state` - Application state shared with the HTTP server
    /// - `sweep_concurrency` - Maximum number of credentials pulled in parallel by the sweep
    pub async fn new(state: AppState, sweep_concurrency: usize) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;

        Ok(Self {
            state,
            sweep_concurrency,
            sched,
        })
    }

    /// Registers the sweep and purge jobs and starts the scheduler.
    pub async fn start(mut self) -> Result<(), Error> {
        let concurrency = self.sweep_concurrency;

        self.schedule_job(sweep_config::CRON_EXPRESSION, "credential sweep", move |state| {
            async move {
                CredentialSweep::new(state, concurrency).run().await?;

                Ok(())
            }
        })
        .await?;

        self.schedule_job(
            purge_config::CRON_EXPRESSION,
            "expired credential purge",
            |state: AppState| async move {
                let service = CredentialService::new(
                    &state.db,
                    state.key_api.as_ref(),
                    state.grant_sink.as_ref(),
                    &state.policy,
                );

                let purged = service.purge_expired(Utc::now().naive_utc()).await?;
                if purged > 0 {
                    tracing::info!("Purged {} expired credential(s)", purged);
                }

                Ok(())
            },
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state on every run and its error, if any,
    /// is logged.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    if let Err(e) = function(state).await {
                        tracing::error!("Error running {}: {:?}", name, e);
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
