//! reqwest implementation of the backend API

use async_trait::async_trait;
use medisys_shared::config::BackendConfig;
use medisys_store::backend::*;
use medisys_store::wire::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Map a transport failure into the single-message backend error
pub fn http_error(e: reqwest::Error) -> BackendError {
    BackendError::Http {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

/// Turn a status code and body into a value or a backend error.
///
/// An `{ "error": ... }` body wins over the status code, so route messages
/// reach the user even on 4xx/5xx responses.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, BackendError> {
    let value: Option<Value> = serde_json::from_str(body).ok();

    if let Some(message) = value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|e| e.as_str())
    {
        return Err(BackendError::Remote(message.to_string()));
    }

    if !(200..300).contains(&status) {
        let message = if body.trim().is_empty() {
            format!("status {}", status)
        } else {
            body.trim().chars().take(200).collect()
        };
        return Err(BackendError::Http {
            status: Some(status),
            message,
        });
    }

    match value {
        Some(v) => serde_json::from_value(v).map_err(|e| BackendError::Decode(e.to_string())),
        None => Err(BackendError::Decode("response body is not JSON".to_string())),
    }
}

/// Like `decode_response`, for routes that answer with a single record.
///
/// Derived struct impls also accept a JSON array filled by position, so any
/// non-object body is rejected before decoding.
pub fn decode_object<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, BackendError> {
    let value: Value = decode_response(status, body)?;
    if !value.is_object() {
        return Err(BackendError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    serde_json::from_value(value).map_err(|e| BackendError::Decode(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build().map_err(http_error)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the status code with the raw body
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<(u16, String), BackendError> {
        let resp = request.send().await.map_err(http_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(http_error)?;
        Ok((status, body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let (status, body) = self.send(self.client.get(&url).query(query)).await?;
        decode_response(status, &body)
    }

    async fn get_object<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let (status, body) = self.send(self.client.get(&url)).await?;
        decode_object(status, &body)
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let (status, text) = self.send(self.client.post(&url).json(body)).await?;
        decode_object(status, &text)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_appointments(
        &self,
        filter: &AppointmentFilter,
    ) -> Result<Vec<WireAppointment>, BackendError> {
        let mut query = Vec::new();
        if let Some(id) = &filter.patient_id {
            query.push(("patientId", id.clone()));
        }
        if let Some(id) = &filter.doctor_id {
            query.push(("doctorId", id.clone()));
        }
        self.get("appointments", &query).await
    }

    async fn book_appointment(&self, request: &BookingRequest) -> Result<BookingReceipt, BackendError> {
        let receipt: BookingReceipt = self.post("appointments", request).await?;
        if receipt.success {
            Ok(receipt)
        } else {
            Err(BackendError::Remote(if receipt.message.is_empty() {
                "Failed to book appointment".to_string()
            } else {
                receipt.message
            }))
        }
    }

    async fn list_doctors(&self, filter: &DoctorFilter) -> Result<Vec<WireDoctor>, BackendError> {
        let mut query = Vec::new();
        if filter.available_only {
            query.push(("available", "true".to_string()));
        }
        if let Some(s) = &filter.specialization {
            query.push(("specialization", s.clone()));
        }
        self.get("doctors", &query).await
    }

    async fn list_patients(&self) -> Result<Vec<WirePatient>, BackendError> {
        self.get("patients", &[]).await
    }

    async fn list_bills(&self) -> Result<Vec<WireBill>, BackendError> {
        self.get("billing", &[]).await
    }

    async fn list_lab_tests(&self) -> Result<Vec<WireLabTest>, BackendError> {
        self.get("lab-tests", &[]).await
    }

    async fn list_rooms(&self, filter: &RoomFilter) -> Result<Vec<WireRoom>, BackendError> {
        let mut query = Vec::new();
        if let Some(t) = &filter.room_type {
            query.push(("type", t.clone()));
        }
        if filter.available_only {
            query.push(("available", "true".to_string()));
        }
        self.get("rooms", &query).await
    }

    async fn create(&self, resource: Resource, body: &Value) -> Result<Value, BackendError> {
        self.post(resource.path(), body).await
    }

    async fn report(&self, kind: ReportKind) -> Result<Value, BackendError> {
        self.get("reports", &[("type", kind.as_query().to_string())]).await
    }

    async fn dashboard_stats(&self) -> Result<BackendStats, BackendError> {
        self.get_object("dashboard/stats").await
    }

    fn name(&self) -> &str {
        "http"
    }
}
