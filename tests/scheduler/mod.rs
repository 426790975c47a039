//! Tests for scheduled jobs.

mod sweep;
