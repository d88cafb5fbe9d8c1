use axum::extract::rejection::JsonRejection;

use super::prelude::*;
use crate::generator::{GenerateBody, GenerationResult};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateResponse {
    success: bool,
    #[serde(flatten)]
    result: GenerationResult,
}

/// handles POST /api/generate
pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, GeneratorError> {
    // An unreadable body has no usable fields.
    let Json(body) = payload.map_err(|rejection| {
        info!("Undecodable generate request: {}", rejection);
        GeneratorError::MissingFields
    })?;

    let result = state.generator.generate(body).await?;
    Ok(Json(GenerateResponse {
        success: true,
        result,
    }))
}
