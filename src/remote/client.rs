use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{
    BundleRef, ImportRequest, ImportResult, ImportStatus, RemoteClient, RemoteError, RemoteResult,
};
use crate::config::{ProjectConfig, SyncSettings};

const EXPORT_PATH: &str = "project/export";
const IMPORT_PATH: &str = "project/import";
const EXPORT_FORMAT: &str = "po";

#[derive(Debug, Deserialize)]
struct ExportResponse {
    bundle: Option<BundleFile>,
}

#[derive(Debug, Deserialize)]
struct BundleFile {
    file: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImportResponse {
    response: ImportPayload,
}

#[derive(Debug, Deserialize)]
struct ImportPayload {
    status: ImportStatus,
    #[serde(default)]
    message: String,
}

/// Client for the Lokalise HTTP API.
pub struct LokaliseClient {
    api_url: String,
    storage_url: String,
    project_id: String,
    api_token: String,
    client: Client,
}

impl LokaliseClient {
    /// Create a client for one project.
    ///
    /// Both URLs in `settings` are expected to end with `/`.
    pub fn new(project: &ProjectConfig, settings: &SyncSettings) -> Self {
        Self {
            api_url: settings.api_url.clone(),
            storage_url: settings.storage_url.clone(),
            project_id: project.project_id.clone(),
            api_token: project.api_token.clone(),
            client: Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Resolve a bundle file reference against the storage base URL.
    pub fn bundle_url(&self, file: &str) -> String {
        format!("{}{}", self.storage_url, file.trim_start_matches('/'))
    }

    /// Decode a JSON body, mapping non-2xx statuses to [`RemoteError::Status`].
    async fn handle_response<T: DeserializeOwned>(response: Response) -> RemoteResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message: if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body
                },
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

impl RemoteClient for LokaliseClient {
    #[instrument(skip(self))]
    async fn export_bundle(&self, locales: &[String]) -> RemoteResult<BundleRef> {
        let mut fields = vec![
            ("api_token", self.api_token.clone()),
            ("id", self.project_id.clone()),
            ("use_original", flag(true).to_string()),
            ("type", EXPORT_FORMAT.to_string()),
        ];
        // An empty list would match nothing, so leave the filter out entirely
        if !locales.is_empty() {
            fields.push(("langs", serde_json::to_string(locales)?));
        }

        let response = self
            .client
            .post(self.endpoint(EXPORT_PATH))
            .form(&fields)
            .send()
            .await
            .map_err(|e| RemoteError::ConnectionFailed { source: e })?;

        let export: ExportResponse = Self::handle_response(response).await?;
        let file = export
            .bundle
            .and_then(|b| b.file)
            .filter(|f| !f.trim().is_empty())
            .ok_or(RemoteError::MissingBundle)?;

        let download_url = self.bundle_url(&file);
        debug!(%download_url, "Export bundle ready");
        Ok(BundleRef { download_url })
    }

    #[instrument(skip_all, fields(file = %request.filename, locale = request.locale))]
    async fn import_file(&self, request: ImportRequest<'_>) -> RemoteResult<ImportResult> {
        let tags = serde_json::to_string(request.tags)?;
        let part = Part::bytes(request.content).file_name(request.filename.clone());

        let form = Form::new()
            .text("api_token", self.api_token.clone())
            .text("id", self.project_id.clone())
            .part("file", part)
            .text("lang_iso", request.locale.to_string())
            .text("replace", flag(request.options.replace))
            .text("fill_empty", flag(request.options.fill_empty))
            .text("distinguish", flag(request.options.distinguish))
            .text("hidden", flag(request.hidden))
            .text("tags", tags);

        let response = self
            .client
            .post(self.endpoint(IMPORT_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RemoteError::ConnectionFailed { source: e })?;

        let import: ImportResponse = Self::handle_response(response).await?;
        Ok(ImportResult {
            status: import.response.status,
            message: import.response.message,
        })
    }

    #[instrument(skip(self))]
    async fn download(&self, url: &str) -> RemoteResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RemoteError::ConnectionFailed { source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "Downloaded");
        Ok(bytes.to_vec())
    }
}
