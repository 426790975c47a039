//! Cron schedules of the periodic jobs.

/// Credential sweep schedule.
pub mod sweep {
    /// Cron expression for the credential sweep
    /// Runs every 30 minutes on the hour and half hour
    pub const CRON_EXPRESSION: &str = "0 */30 * * * *";
}

/// Expired credential purge schedule.
pub mod purge {
    /// Cron expression for purging expired credentials
    /// Runs every 5 minutes
    pub const CRON_EXPRESSION: &str = "0 */5 * * * *";
}
