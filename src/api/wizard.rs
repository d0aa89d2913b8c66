//! Custom arrangement request handlers

use crate::api::SessionQuery;
use crate::error::Result;
use crate::state::SharedState;
use crate::wizard::{self, CustomRequest, FruitSelection, WizardSelections};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CustomRequestBody {
    #[serde(default)]
    pub session: String,
    pub selections: WizardSelections,
}

/// The client sends the whole wizard form at once; the server replays the
/// step gating before recording the request.
pub async fn submit_request(
    State(state): State<SharedState>,
    Json(body): Json<CustomRequestBody>,
) -> Result<(StatusCode, Json<CustomRequest>)> {
    let request = state.submit_custom_request(&body.session, body.selections).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

pub async fn list_requests(
    State(state): State<SharedState>,
    Query(query): Query<SessionQuery>,
) -> Result<Json<Vec<CustomRequest>>> {
    state.sessions.require_admin(&query.session).await?;
    Ok(Json(state.custom_requests.list().await))
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    #[serde(default)]
    pub fruits: Vec<FruitSelection>,
}

#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    pub estimated_cost: Decimal,
}

/// Live price preview shown while the fruit step is being filled in.
pub async fn estimate(Json(body): Json<EstimateRequest>) -> Json<EstimateResponse> {
    Json(EstimateResponse { estimated_cost: wizard::estimate_cost(&body.fruits) })
}
