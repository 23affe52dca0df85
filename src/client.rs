use std::future::Future;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{DashError, DashResult};
use crate::models::{EntriesPage, EntryId, Profile, SaveOutcome};
use crate::sync::WeightService;

/// Base URL used when `WEIGHTY_BASE_URL` is unset.
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5050";
/// How many rows the dashboard asks the list endpoint for.
const LIST_LIMIT: u32 = 100;
/// Header the page token rides along on for writes.
const CSRF_HEADER: &str = "X-CSRF-Token";

/// HTTP client for the Weighty service's JSON API.
#[derive(Debug, Clone)]
pub struct WeightyClient {
    http: Client,
    base_url: String,
    csrf_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    profile: Profile,
}

impl WeightyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: None,
        }
    }

    /// Build a client from `WEIGHTY_BASE_URL`, falling back to the local
    /// dev server address.
    pub fn from_env() -> Self {
        let base = std::env::var("WEIGHTY_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base)
    }

    /// Attach the token the page ships in its meta tag. Writes send it as
    /// `X-CSRF-Token`; the service accepts writes without it.
    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn write(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.csrf_token {
            Some(token) => req.header(CSRF_HEADER, token),
            None => req,
        }
    }

    /// Fetch the user profile.
    pub async fn fetch_profile(&self) -> DashResult<Profile> {
        let resp = self.http.get(self.api("/api/profile")).send().await?;
        let envelope: ProfileEnvelope = read_json(resp).await?;
        Ok(envelope.profile)
    }

    /// Fetch the newest entries with streak and total counters.
    pub async fn fetch_entries(&self) -> DashResult<EntriesPage> {
        let resp = self
            .http
            .get(self.api("/api/weights"))
            .query(&[("limit", LIST_LIMIT)])
            .send()
            .await?;
        read_json(resp).await
    }

    /// Create an entry. The service upserts by date, so posting an already
    /// logged date overwrites that day's weight.
    pub async fn create_entry(&self, date: &str, weight: f64) -> DashResult<SaveOutcome> {
        debug!(date, weight, "posting new entry");
        let resp = self
            .write(self.http.post(self.api("/api/weights")))
            .json(&json!({ "date": date, "weight": weight }))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Rewrite an existing entry's date and weight.
    pub async fn update_entry(
        &self,
        id: EntryId,
        date: &str,
        weight: f64,
    ) -> DashResult<SaveOutcome> {
        debug!(id, date, weight, "updating entry");
        let resp = self
            .write(self.http.put(self.api(&format!("/api/weights/{id}"))))
            .json(&json!({ "date": date, "weight": weight }))
            .send()
            .await?;
        read_json(resp).await
    }

    /// Delete an entry by id.
    pub async fn delete_entry(&self, id: EntryId) -> DashResult<()> {
        debug!(id, "deleting entry");
        let resp = self
            .write(self.http.delete(self.api(&format!("/api/weights/{id}"))))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(service_error(resp).await);
        }
        Ok(())
    }

    /// Download the CSV export of the full log. The service unlocks the
    /// share achievement as a side effect.
    pub async fn export_csv(&self) -> DashResult<String> {
        let resp = self.http.get(self.api("/export.csv")).send().await?;
        if !resp.status().is_success() {
            return Err(service_error(resp).await);
        }
        resp.text().await.map_err(DashError::from)
    }
}

impl WeightService for WeightyClient {
    fn fetch_profile(&self) -> impl Future<Output = DashResult<Profile>> + Send {
        WeightyClient::fetch_profile(self)
    }

    fn fetch_entries(&self) -> impl Future<Output = DashResult<EntriesPage>> + Send {
        WeightyClient::fetch_entries(self)
    }

    fn create_entry(
        &self,
        date: &str,
        weight: f64,
    ) -> impl Future<Output = DashResult<SaveOutcome>> + Send {
        WeightyClient::create_entry(self, date, weight)
    }

    fn update_entry(
        &self,
        id: EntryId,
        date: &str,
        weight: f64,
    ) -> impl Future<Output = DashResult<SaveOutcome>> + Send {
        WeightyClient::update_entry(self, id, date, weight)
    }

    fn delete_entry(&self, id: EntryId) -> impl Future<Output = DashResult<()>> + Send {
        WeightyClient::delete_entry(self, id)
    }
}

/// Decode a 2xx JSON body, or turn a failure body into a user-facing error.
async fn read_json<T: serde::de::DeserializeOwned>(resp: Response) -> DashResult<T> {
    if !resp.status().is_success() {
        return Err(service_error(resp).await);
    }
    resp.json().await.map_err(DashError::from)
}

async fn service_error(resp: Response) -> DashError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    DashError::Service(extract_message(status, &body))
}

/// Pull the friendliest message out of a failure body: field errors first,
/// then the top-level message, then a plain status fallback.
fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(errors) = value.get("errors").and_then(|e| e.as_object()) {
            let joined: Vec<&str> = errors.values().filter_map(|m| m.as_str()).collect();
            if !joined.is_empty() {
                return joined.join(" ");
            }
        }
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    format!("The service replied with HTTP {}.", status.as_u16())
}
