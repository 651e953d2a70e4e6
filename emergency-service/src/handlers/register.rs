use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{RegisterRequest, RegisterResponse},
    services::metrics::record_registration,
    utils::FormInput,
    AppState,
};

/// Register a user's emergency contact details.
///
/// No duplicate detection is performed: submitting the same details twice
/// yields two users.
pub async fn register(
    State(state): State<AppState>,
    FormInput(payload): FormInput<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user_id = state.directory.insert(payload.into()).await?;

    tracing::info!(user_id = %user_id, "User registered");
    record_registration();

    Ok(Json(RegisterResponse {
        message: "User registered successfully".to_string(),
        user_id,
    }))
}
