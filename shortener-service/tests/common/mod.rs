use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use reqwest::StatusCode;
use serde_json::json;
use serde_json::Value;
use shortener_service::account::service::AccountService;
use shortener_service::authentication::service::AuthService;
use shortener_service::inbound::http::router::create_router;
use shortener_service::repositories::InMemoryStore;
use shortener_service::short_url::service::ShortUrlService;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const PASSWORD: &str = "Secret1!";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub store: InMemoryStore,
    pub api_client: reqwest::Client,
    /// Same keys and TTL as the server, for minting tokens directly
    pub authenticator: Authenticator,
}

/// Account registered and logged in through the API
pub struct TestAccount {
    pub id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = InMemoryStore::new();
        let repository = Arc::new(store.clone());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&repository),
            Arc::clone(&repository),
            Arc::new(Authenticator::new(JWT_SECRET, Duration::minutes(15))),
            Duration::hours(24),
        ));
        let account_service = Arc::new(AccountService::new(Arc::clone(&repository)));
        let short_url_service = Arc::new(ShortUrlService::new(repository));

        let router = create_router(auth_service, account_service, short_url_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            authenticator: Authenticator::new(JWT_SECRET, Duration::minutes(15)),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn refresh(&self, refresh_token: &str) -> reqwest::Response {
        self.post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register and log in a fresh account
    pub async fn create_account(&self, email: &str) -> TestAccount {
        let response = self.register(email, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let registered: Value = response.json().await.expect("Failed to parse response");

        let response = self.login(email, PASSWORD).await;
        assert_eq!(response.status(), StatusCode::OK);
        let tokens: Value = response.json().await.expect("Failed to parse response");

        TestAccount {
            id: registered["id"].as_str().unwrap().to_string(),
            email: email.to_string(),
            access_token: tokens["access_token"].as_str().unwrap().to_string(),
            refresh_token: tokens["refresh_token"].as_str().unwrap().to_string(),
        }
    }

    pub async fn create_short_url(
        &self,
        account: &TestAccount,
        short_url: &str,
        long_url: &str,
    ) -> reqwest::Response {
        self.post_authenticated("/api/url", &account.access_token)
            .json(&json!({ "short_url": short_url, "long_url": long_url }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}
