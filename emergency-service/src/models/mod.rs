use serde::{Deserialize, Serialize};

/// Emergency contact details held for a registered user.
///
/// Fields are stored exactly as submitted; none of them are validated.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub contact: String,
    pub email: String,
}

impl UserProfile {
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            email: email.into(),
        }
    }
}

/// The two profiles the service historically shipped with, used when
/// sample seeding is enabled.
pub fn sample_profiles() -> Vec<UserProfile> {
    vec![
        UserProfile::new("John Doe", "+123456789", "johndoe@example.com"),
        UserProfile::new("Jane Monrow", "+123456789", "janemonrow@example.com"),
    ]
}
