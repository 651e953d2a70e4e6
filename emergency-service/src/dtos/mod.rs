use serde::{Deserialize, Serialize};

use crate::models::UserProfile;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub contact: String,
    pub email: String,
}

impl From<RegisterRequest> for UserProfile {
    fn from(req: RegisterRequest) -> Self {
        UserProfile::new(req.name, req.contact, req.email)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    #[default]
    Png,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct QrQuery {
    #[serde(default)]
    pub format: QrFormat,
}

/// JSON rendering of a generated code, for clients that embed the image
/// themselves.
#[derive(Debug, Serialize, Deserialize)]
pub struct QrGenerateResponse {
    pub user_id: String,
    pub redemption_url: String,
    pub expires_in: i64,
    pub qr_image_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct RedeemQuery {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContactResponse {
    pub name: String,
    pub contact: String,
    pub email: String,
}

impl From<UserProfile> for EmergencyContactResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            contact: profile.contact,
            email: profile.email,
        }
    }
}
