//! MyFinance backend REST client
//!
//! Every backend response is wrapped in `{success, message, data}`. A
//! `success: false` body becomes `Error::Api`, as does a 400 carrying such a
//! body. A 401 becomes `Error::Unauthorized`, and any other non-2xx status
//! becomes `Error::Http`.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use crate::models::{Budget, CategoryReport, MonthlyReport, Transaction, YearlyReport};

/// Backend response envelope
///
/// Missing `message`/`data` fields deserialize as `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::Api(
                self.message
                    .unwrap_or_else(|| "Request failed".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| Error::Api("Response contained no data".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "type", default = "default_token_type")]
    pub token_type: String,
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    /// Token lifetime in milliseconds
    #[serde(default)]
    pub expires_in: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Async client for the MyFinance backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Build a client with the configured URL, token and timeout
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
        match response.status() {
            StatusCode::UNAUTHORIZED => return Err(Error::Unauthorized),
            // Validation failures come back as 400 with an error envelope
            StatusCode::BAD_REQUEST => {
                let body: ApiResponse<serde_json::Value> = response.json().await?;
                return Err(Error::Api(
                    body.message.unwrap_or_else(|| "Bad request".to_string()),
                ));
            }
            _ => {}
        }
        let response = response.error_for_status()?;
        let body: ApiResponse<T> = response.json().await?;
        body.into_data()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .authorized(self.http_client.get(&url))
            .query(query)
            .send()
            .await?;
        Self::read_envelope(response).await
    }

    /// Authenticate and keep the returned bearer token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http_client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&request)
            .send()
            .await?;

        let login: LoginResponse = Self::read_envelope(response).await?;
        info!(email = %login.email, "Logged in to backend");
        self.token = Some(login.token.clone());
        Ok(login)
    }

    pub async fn monthly_report(&self, year: i32, month: u32) -> Result<MonthlyReport> {
        self.get(
            "/api/reports/monthly",
            &[("year", year.to_string()), ("month", month.to_string())],
        )
        .await
    }

    pub async fn yearly_report(&self, year: i32) -> Result<YearlyReport> {
        self.get("/api/reports/yearly", &[("year", year.to_string())])
            .await
    }

    /// Activity of one category between two dates, inclusive
    pub async fn category_report(
        &self,
        category_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CategoryReport> {
        self.get(
            &format!("/api/reports/category/{}", category_id),
            &[("startDate", start.to_string()), ("endDate", end.to_string())],
        )
        .await
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>> {
        self.get("/api/transactions", &[]).await
    }

    pub async fn budgets(&self, year: i32, month: u32) -> Result<Vec<Budget>> {
        self.get(&format!("/api/budgets/period/{}/{}", year, month), &[])
            .await
    }
}
