pub(crate) use crate::error::GeneratorError;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::Json;
pub(crate) use axum::extract::State;
pub(crate) use serde::Serialize;
pub(crate) use tracing::info;
