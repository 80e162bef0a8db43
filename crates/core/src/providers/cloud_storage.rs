use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use super::traits::FileStorage;
use crate::errors::CoreError;
use crate::models::file::SelectedFile;
use crate::models::settings::{Settings, StorageSettings};

/// Raw-file uploader for a Cloudinary-style unsigned upload endpoint.
///
/// Sends a multipart form with `file`, `upload_preset`,
/// `resource_type = "raw"` and `folder`, and reads `secure_url` back.
pub struct CloudStorageUploader {
    client: Client,
    storage: StorageSettings,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

impl CloudStorageUploader {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder().timeout(settings.request_timeout());
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            storage: settings.storage.clone(),
        }
    }

    fn form_for(&self, file: &SelectedFile) -> Form {
        let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        Form::new()
            .part("file", part)
            .text("upload_preset", self.storage.upload_preset.clone())
            .text("resource_type", "raw")
            .text("folder", self.storage.folder.clone())
    }
}

#[async_trait]
impl FileStorage for CloudStorageUploader {
    fn name(&self) -> &str {
        "Cloudinary"
    }

    async fn upload_raw(&self, file: &SelectedFile) -> Result<String, CoreError> {
        tracing::debug!(name = %file.name, size = file.bytes.len(), "uploading archive");
        let resp = self
            .client
            .post(&self.storage.upload_url)
            .multipart(self.form_for(file))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CoreError::Upload(format!(
                "{} rejected {} with status {}: {}",
                self.name(),
                file.name,
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: UploadResponse = resp.json().await.map_err(|e| {
            CoreError::Deserialization(format!("Failed to parse upload response: {e}"))
        })?;

        parsed
            .secure_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| CoreError::Upload(format!("{} returned no secure_url", self.name())))
    }
}
