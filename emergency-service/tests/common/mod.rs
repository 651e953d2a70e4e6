//! Test helper module for emergency-service integration tests.

#![allow(dead_code)]

use emergency_service::config::{Config, Environment, TokenConfig};
use emergency_service::startup::Application;
use emergency_service::AppState;
use secrecy::Secret;
use service_core::config as core_config;

pub const TEST_SECRET: &str = "integration-test-signing-secret-0123456789";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub state: AppState,
    client: reqwest::Client,
}

pub fn test_config(seed_sample_users: bool) -> Config {
    Config {
        common: core_config::Config {
            host: "127.0.0.1".to_string(),
            port: 0, // Random port
            ..core_config::Config::default()
        },
        environment: Environment::Dev,
        service_name: "emergency-service-test".to_string(),
        token: TokenConfig {
            secret: Secret::new(TEST_SECRET.to_string()),
            ttl_minutes: 60,
        },
        public_base_url: "http://127.0.0.1:8000".to_string(),
        seed_sample_users,
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config(false)).await
    }

    /// Spawn with `user1` and `user2` already registered.
    pub async fn spawn_seeded() -> Self {
        Self::spawn_with(test_config(true)).await
    }

    pub async fn spawn_with(config: Config) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let state = app.state();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to accept connections
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            state,
            client,
        }
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub async fn register(&self, name: &str, contact: &str, email: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/register", self.address))
            .form(&[("name", name), ("contact", contact), ("email", email)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn generate_qr(&self, user_id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/generate_qr/{}", self.address, user_id))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn redeem(&self, token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/emergency_contact", self.address))
            .query(&[("token", token)])
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// Read the text encoded in a QR code PNG.
pub fn decode_qr(png: &[u8]) -> String {
    let image = image::load_from_memory(png)
        .expect("Body is not a decodable image")
        .to_luma8();

    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "Expected exactly one QR code in the image");

    let (_meta, content) = grids[0].decode().expect("Failed to decode QR code");
    content
}

/// Split a redemption URL into its base and the decoded token.
pub fn token_from_url(url: &str) -> (String, String) {
    let (base, encoded_token) = url
        .split_once("?token=")
        .expect("URL carries a token parameter");
    let token = urlencoding::decode(encoded_token)
        .expect("Token is valid UTF-8")
        .into_owned();
    (base.to_string(), token)
}
