//! Tests for the service layer.

mod credential;
