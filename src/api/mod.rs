pub mod dto;

use std::path::Path;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::{Group, Publisher, ReportData, month_name};

pub use dto::{AdminUpdateRequest, Envelope, NewPublisherRequest, SaveMonthRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Excel,
    Pdf,
}

impl ExportKind {
    pub fn path_segment(&self) -> &'static str {
        match self {
            ExportKind::Excel => "excel",
            ExportKind::Pdf => "pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportKind::Excel => "xlsx",
            ExportKind::Pdf => "pdf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Excel => "Excel",
            ExportKind::Pdf => "PDF",
        }
    }

    /// File name the backend uses when it does not send one.
    pub fn default_file_name(&self, group_id: u32, month: u32, year: i32) -> String {
        format!(
            "informe_grupo_{}_{}_{}.{}",
            group_id,
            month_name(month).unwrap_or("Mes"),
            year,
            self.extension()
        )
    }
}

/// Downloaded report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Backend surface consumed by the client.
#[async_trait]
pub trait ReportsApi: Send + Sync {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError>;
    async fn list_group_publishers(&self, group_id: u32) -> Result<Vec<Publisher>, ClientError>;
    async fn list_all_publishers(&self) -> Result<Vec<Publisher>, ClientError>;
    async fn save_month(&self, id: &str, req: &SaveMonthRequest) -> Result<(), ClientError>;
    async fn save_admin(&self, id: &str, req: &AdminUpdateRequest) -> Result<(), ClientError>;
    /// Returns the id assigned by the backend, when it reports one.
    async fn create_publisher(&self, req: &NewPublisherRequest) -> Result<Option<String>, ClientError>;
    async fn delete_publisher(&self, id: &str) -> Result<(), ClientError>;
    async fn export_report(
        &self,
        kind: ExportKind,
        group_id: u32,
        month: u32,
        year: i32,
    ) -> Result<ExportFile, ClientError>;
    async fn fetch_report(&self, group_id: u32, month: u32, year: i32) -> Result<ReportData, ClientError>;
}

pub struct HttpReportsApi {
    client: Client,
    config: ClientConfig,
}

impl HttpReportsApi {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.config.endpoint(path);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = ensure_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn read_envelope(&self, response: Response) -> Result<Envelope, ClientError> {
        let response = ensure_status(response).await?;
        let body = response.text().await?;
        let envelope: Envelope = serde_json::from_str(&body)?;

        if !envelope.success {
            let reason = envelope
                .error
                .or(envelope.message)
                .unwrap_or_else(|| "success=false".to_string());
            warn!("backend rejected request: {}", reason);
            return Err(ClientError::Rejected(reason));
        }
        Ok(envelope)
    }
}

async fn ensure_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ClientError::NotFound(body));
    }
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Extracts a bare file name from a `Content-Disposition` header value.
pub fn disposition_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .and_then(|name| Path::new(name).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ReportsApi for HttpReportsApi {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        self.get_json("/api/grupos").await
    }

    async fn list_group_publishers(&self, group_id: u32) -> Result<Vec<Publisher>, ClientError> {
        self.get_json(&format!("/api/personas/{}", group_id)).await
    }

    async fn list_all_publishers(&self) -> Result<Vec<Publisher>, ClientError> {
        self.get_json("/api/publishers/all").await
    }

    async fn save_month(&self, id: &str, req: &SaveMonthRequest) -> Result<(), ClientError> {
        let url = self.config.endpoint(&format!("/api/persona/{}", id));
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(req).send().await?;
        self.read_envelope(response).await?;
        Ok(())
    }

    async fn save_admin(&self, id: &str, req: &AdminUpdateRequest) -> Result<(), ClientError> {
        let url = self.config.endpoint(&format!("/api/persona/admin/{}", id));
        debug!("PUT {}", url);

        let response = self.client.put(&url).json(req).send().await?;
        self.read_envelope(response).await?;
        Ok(())
    }

    async fn create_publisher(&self, req: &NewPublisherRequest) -> Result<Option<String>, ClientError> {
        let url = self.config.endpoint("/api/publishers");
        debug!("POST {}", url);

        let response = self.client.post(&url).json(req).send().await?;
        let envelope = self.read_envelope(response).await?;
        Ok(envelope.id)
    }

    async fn delete_publisher(&self, id: &str) -> Result<(), ClientError> {
        let url = self.config.endpoint(&format!("/api/publishers/{}", id));
        debug!("DELETE {}", url);

        let response = self.client.delete(&url).send().await?;
        self.read_envelope(response).await?;
        Ok(())
    }

    async fn export_report(
        &self,
        kind: ExportKind,
        group_id: u32,
        month: u32,
        year: i32,
    ) -> Result<ExportFile, ClientError> {
        let url = self.config.endpoint(&format!(
            "/api/export/{}/{}/{}/{}",
            kind.path_segment(),
            group_id,
            month,
            year
        ));
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let response = ensure_status(response).await?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_file_name)
            .unwrap_or_else(|| kind.default_file_name(group_id, month, year));
        let bytes = response.bytes().await?.to_vec();

        Ok(ExportFile { file_name, bytes })
    }

    async fn fetch_report(&self, group_id: u32, month: u32, year: i32) -> Result<ReportData, ClientError> {
        self.get_json(&format!("/api/reporte/{}/{}/{}", group_id, month, year))
            .await
    }
}
