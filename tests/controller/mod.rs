//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extracted arguments; the router tests go through the
//! full axum stack.

mod credential;
mod router;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keyward::server::model::app::AppState;
use keyward_test_utils::prelude::*;

use crate::util::{RecordingSink, TestContextExt};

fn app_state(test: &TestContext) -> AppState {
    test.app_state(Arc::new(RecordingSink::default()))
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
