use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "phishguard",
        "model": state.model.model_name(),
        "store": if state.store.is_some() { "online" } else { "offline" },
    }))
}
