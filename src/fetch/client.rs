use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Request, Response};

/// Executes HTTP requests for the dataset loader.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}

/// Plain `reqwest` client with connect and request timeouts.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new() -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req).await
    }
}
