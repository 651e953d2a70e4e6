use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::UserProfile;
use crate::services::ServiceError;

/// Storage seam for registered users. Profiles are inserted once and never
/// updated or removed.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Store `profile` under a newly issued id and return that id.
    async fn insert(&self, profile: UserProfile) -> Result<String, ServiceError>;

    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ServiceError>;

    async fn len(&self) -> Result<usize, ServiceError>;
}

/// Process-local directory. Ids are `user{n}` where `n` is the directory size
/// after insertion; the id is computed under the write lock so concurrent
/// registrations never share one.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with `profiles`, numbered from `user1`.
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let users = profiles
            .into_iter()
            .enumerate()
            .map(|(idx, profile)| (format_user_id(idx + 1), profile))
            .collect();

        Self {
            users: RwLock::new(users),
        }
    }
}

fn format_user_id(n: usize) -> String {
    format!("user{}", n)
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn insert(&self, profile: UserProfile) -> Result<String, ServiceError> {
        let mut users = self.users.write().await;

        let user_id = format_user_id(users.len() + 1);
        if users.contains_key(&user_id) {
            return Err(ServiceError::Internal(anyhow::anyhow!(
                "User id {} already issued",
                user_id
            )));
        }
        users.insert(user_id.clone(), profile);

        Ok(user_id)
    }

    async fn get(&self, user_id: &str) -> Result<Option<UserProfile>, ServiceError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn len(&self) -> Result<usize, ServiceError> {
        Ok(self.users.read().await.len())
    }
}
