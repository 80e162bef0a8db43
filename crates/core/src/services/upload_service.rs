use std::sync::Arc;

use crate::errors::CoreError;
use crate::models::file::{FileRecord, SaveFileRequest, SelectedFile};
use crate::providers::traits::{DashboardApi, FileStorage};

pub const MSG_NO_FILE: &str = "Please select a .zip or .rar file";
pub const MSG_BAD_EXTENSION: &str = "Only .zip or .rar files allowed!";
pub const MSG_UPLOAD_OK: &str = "File uploaded and saved successfully!";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed. Try again.";

/// Uploads archives to the storage provider and records them in the backend.
///
/// Flow for one submission:
/// 1. validate the selection locally (no network on failure)
/// 2. upload raw bytes to storage → public URL
/// 3. `POST /files/save` with the original name and that URL
/// 4. re-list all stored files (done by the caller via `list_files`)
#[derive(Clone)]
pub struct UploadService {
    api: Arc<dyn DashboardApi>,
    storage: Arc<dyn FileStorage>,
}

impl UploadService {
    pub fn new(api: Arc<dyn DashboardApi>, storage: Arc<dyn FileStorage>) -> Self {
        Self { api, storage }
    }

    /// Check a selection before anything is sent.
    pub fn validate(selection: Option<&SelectedFile>) -> Result<&SelectedFile, CoreError> {
        let file = selection.ok_or_else(|| CoreError::ValidationError(MSG_NO_FILE.into()))?;
        if !file.has_allowed_extension() {
            return Err(CoreError::ValidationError(MSG_BAD_EXTENSION.into()));
        }
        Ok(file)
    }

    /// Upload and persist one archive, returning the backend's record.
    pub async fn upload(&self, selection: Option<&SelectedFile>) -> Result<FileRecord, CoreError> {
        let file = Self::validate(selection)?;

        let url = self.storage.upload_raw(file).await?;
        tracing::info!(name = %file.name, provider = self.storage.name(), "archive stored");

        let request = SaveFileRequest {
            name: file.name.clone(),
            url,
        };
        let record = self.api.save_file(&request).await?;
        tracing::info!(id = %record.id, "file record saved");
        Ok(record)
    }

    pub async fn list_files(&self) -> Result<Vec<FileRecord>, CoreError> {
        self.api.list_files().await
    }
}
