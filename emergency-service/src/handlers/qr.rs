use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use service_core::error::AppError;

use crate::{
    dtos::{QrFormat, QrGenerateResponse, QrQuery},
    services::{
        metrics::record_code_generated,
        qr::{redemption_url, render_png},
        ServiceError,
    },
    utils::QueryInput,
    AppState,
};

/// Issue a fresh access token for `user_id` and return it as a QR code.
///
/// The default response is the PNG itself; `?format=json` wraps it in base64
/// together with the embedded URL. Every call mints a new token and earlier
/// codes stay valid until they expire.
pub async fn generate_qr(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    QueryInput(query): QueryInput<QrQuery>,
) -> Result<Response, AppError> {
    if state.directory.get(&user_id).await?.is_none() {
        tracing::info!(user_id = %user_id, "QR requested for unknown user");
        return Err(ServiceError::UserNotFound.into());
    }

    let ttl = state.tokens.default_ttl();
    let token = state.tokens.mint(&user_id, ttl)?;
    let url = redemption_url(&state.config.public_base_url, &token);

    let render_input = url.clone();
    let png = tokio::task::spawn_blocking(move || render_png(&render_input))
        .await
        .map_err(|e| ServiceError::Internal(anyhow::anyhow!("QR render task failed: {}", e)))??;

    tracing::info!(
        user_id = %user_id,
        bytes = png.len(),
        format = ?query.format,
        "Generated emergency QR code"
    );
    record_code_generated();

    let response = match query.format {
        QrFormat::Png => (
            [
                (header::CONTENT_TYPE, "image/png".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("inline; filename=\"{}_qr.png\"", user_id),
                ),
            ],
            png,
        )
            .into_response(),
        QrFormat::Json => Json(QrGenerateResponse {
            user_id,
            redemption_url: url,
            expires_in: ttl.num_seconds(),
            qr_image_base64: general_purpose::STANDARD.encode(&png),
        })
        .into_response(),
    };

    Ok(response)
}
