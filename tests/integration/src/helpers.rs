//! Test helpers for integration tests
//!
//! Spawns a server on an ephemeral port and wraps the HTTP calls tests make.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use mural_api::{create_app, create_app_state};
use mural_common::{AppConfig, JwtService};
use mural_core::Actor;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    moderator_token: String,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let config = test_config()?;
        Self::start_with_config(config).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry);
        let moderator_token = jwt.issue_token(
            &Actor::new("integration-moderator").with_email("moderator@example.org"),
        )?;

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            moderator_token,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn as_moderator(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.moderator_token)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// GET as the test moderator
    pub async fn admin_get(&self, path: &str) -> Result<Response> {
        Ok(self.as_moderator(self.client.get(self.url(path))).send().await?)
    }

    /// PATCH as the test moderator
    pub async fn admin_patch<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .as_moderator(self.client.patch(self.url(path)))
            .json(body)
            .send()
            .await?)
    }

    /// PUT as the test moderator
    pub async fn admin_put<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .as_moderator(self.client.put(self.url(path)))
            .json(body)
            .send()
            .await?)
    }
}

/// Create a test configuration from the environment
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();

    for key in ["DATABASE_URL", "JWT_SECRET", "API_PORT"] {
        if std::env::var(key).is_err() {
            eprintln!("Skipping test: {key} not set");
            return false;
        }
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
