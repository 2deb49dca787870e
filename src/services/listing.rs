use crate::models::Vehicle;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Keys under which listing payloads nest their vehicle array
const COLLECTION_KEYS: [&str; 4] = ["data", "vehicles", "listings", "cars"];

/// Errors that can occur when talking to the listing service
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Unauthorized: listing service rejected the API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Read-only client for the dealership listing service
///
/// Only fetches the catalog snapshot; the listing service owns every write.
pub struct ListingClient {
    base_url: String,
    vehicles_path: String,
    api_key: Option<String>,
    client: Client,
}

impl ListingClient {
    pub fn new(
        base_url: String,
        vehicles_path: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ListingError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            vehicles_path,
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    fn vehicles_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.vehicles_path.trim_start_matches('/')
        )
    }

    /// Fetch every vehicle currently listed
    pub async fn fetch_vehicles(&self) -> Result<Vec<Vehicle>, ListingError> {
        let url = self.vehicles_url();
        tracing::debug!("Fetching catalog from: {}", url);

        let mut request = self.client.get(&url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ListingError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch catalog: {} - {}", status, body);
            return Err(ListingError::ApiError(format!(
                "Failed to fetch vehicles: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        parse_catalog(&json)
    }
}

/// Extract vehicles from a listing payload.
///
/// Accepts a bare array or an object nesting the array under a known key.
/// Records that do not parse are skipped.
pub fn parse_catalog(json: &Value) -> Result<Vec<Vehicle>, ListingError> {
    let records = match json {
        Value::Array(items) => items,
        Value::Object(map) => COLLECTION_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_array()))
            .ok_or_else(|| ListingError::InvalidResponse("Missing vehicle array".into()))?,
        _ => {
            return Err(ListingError::InvalidResponse(
                "Expected a JSON array or object".into(),
            ))
        }
    };

    let vehicles: Vec<Vehicle> = records
        .iter()
        .filter_map(|record| serde_json::from_value(normalize_id(record)).ok())
        .collect();

    let skipped = records.len() - vehicles.len();
    if skipped > 0 {
        tracing::debug!("Skipped {} unparseable listing records", skipped);
    }
    tracing::debug!("Parsed {} vehicles from catalog", vehicles.len());

    Ok(vehicles)
}

/// Listing records may carry their id as `_id` and as a number
fn normalize_id(record: &Value) -> Value {
    let mut record = record.clone();
    if let Some(obj) = record.as_object_mut() {
        if !obj.contains_key("id") {
            if let Some(id) = obj.get("_id").cloned() {
                obj.insert("id".to_string(), id);
            }
        }
        if let Some(Value::Number(n)) = obj.get("id") {
            let id = n.to_string();
            obj.insert("id".to_string(), Value::String(id));
        }
    }
    record
}
