use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::{
    dtos::{EmergencyContactResponse, RedeemQuery},
    services::{metrics::record_redemption, ServiceError},
    utils::QueryInput,
    AppState,
};

/// Redeem an access token for the bound user's emergency contact details.
pub async fn emergency_contact(
    State(state): State<AppState>,
    QueryInput(query): QueryInput<RedeemQuery>,
) -> Result<Json<EmergencyContactResponse>, AppError> {
    let user_id = state.tokens.validate(&query.token).map_err(|e| {
        match e {
            ServiceError::TokenExpired => record_redemption("expired"),
            _ => record_redemption("invalid"),
        }
        tracing::warn!(error = %e, "Rejected emergency token");
        e
    })?;

    let profile = state.directory.get(&user_id).await?.ok_or_else(|| {
        record_redemption("user_not_found");
        tracing::warn!(user_id = %user_id, "Valid token bound to unknown user");
        ServiceError::UserNotFound
    })?;

    tracing::info!(user_id = %user_id, "Emergency contact redeemed");
    record_redemption("success");

    Ok(Json(profile.into()))
}
