use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

/// Strip an optional markdown code fence from model output.
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed)
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Path(ticker): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let inputs = HashMap::from([("ticker".to_string(), ticker)]);
    let raw = state.crew.kickoff(&inputs).await.map_err(|e| {
        error!("Analysis pipeline failed: {e}");
        ApiError::Pipeline(e.to_string())
    })?;

    let report: Value =
        serde_json::from_str(strip_code_fence(&raw)).map_err(|_| ApiError::InvalidModelOutput)?;
    Ok(Json(report))
}

pub async fn root() -> Json<Value> {
    Json(json!({"message": "Server is running"}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_fences_are_stripped() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "\n{\"a\": 1}\n");
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }
}
