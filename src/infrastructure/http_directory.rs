use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use crate::domain::customer::{ApiError, CustomerCollection, NewCustomer};
use crate::domain::errors::DirectoryError;
use crate::domain::ports::DirectoryApi;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<reqwest::Error> for DirectoryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            DirectoryError::InvalidResponse(e.to_string())
        } else {
            DirectoryError::Transport(e.to_string())
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Talks to the directory endpoint over HTTP: `GET` lists, `POST` creates.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    endpoint: String,
}

impl HttpDirectoryClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builds the error for a non-success response, preferring an `ApiError` body
/// and falling back to the status text.
async fn service_error(response: Response) -> DirectoryError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let error = serde_json::from_str::<ApiError>(&body).unwrap_or_else(|_| fallback_error(status));
    DirectoryError::Service {
        status: status.as_u16(),
        error,
    }
}

fn fallback_error(status: StatusCode) -> ApiError {
    ApiError::new(
        status.as_u16().to_string(),
        status.canonical_reason().unwrap_or("Request failed"),
    )
}

#[async_trait]
impl DirectoryApi for HttpDirectoryClient {
    async fn list_customers(&self) -> Result<CustomerCollection, DirectoryError> {
        let response = self.client.get(&self.endpoint).send().await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        let customers: CustomerCollection = response.json().await?;
        Ok(customers)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<(), DirectoryError> {
        // `.json()` also sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.endpoint)
            .json(customer)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        Ok(())
    }
}
