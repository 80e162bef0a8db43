//! File upload view state.

use crate::errors::CoreError;
use crate::models::file::{FileRecord, SelectedFile};
use crate::models::notice::Notice;
use crate::services::upload_service::{UploadService, MSG_UPLOAD_FAILED, MSG_UPLOAD_OK};

/// State of the file upload section.
///
/// One submission at a time: [`begin_submit`](Self::begin_submit) refuses
/// while `uploading` is set, and only
/// [`finish_submit`](Self::finish_submit) clears it.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    files: Vec<FileRecord>,
    selected: Option<SelectedFile>,
    uploading: bool,
    message: Option<String>,
    listing_ticket: u64,
    applied_listing: u64,
}

impl UploadState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, file: SelectedFile) {
        self.selected = Some(file);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Validate the selection and mark the upload as in flight.
    ///
    /// On success returns a copy of the file to hand to the uploader. On
    /// failure nothing is sent and the message explains why.
    pub fn begin_submit(&mut self) -> Result<SelectedFile, CoreError> {
        if self.uploading {
            return Err(CoreError::UploadInProgress);
        }
        match UploadService::validate(self.selected.as_ref()) {
            Ok(file) => {
                let file = file.clone();
                self.uploading = true;
                self.message = None;
                Ok(file)
            }
            Err(e) => {
                if let CoreError::ValidationError(msg) = &e {
                    self.message = Some(msg.clone());
                }
                Err(e)
            }
        }
    }

    /// Record the outcome of the storage upload + metadata save.
    ///
    /// The caller re-lists files after a success: it takes a ticket from
    /// [`begin_listing`](Self::begin_listing) and feeds the listing to
    /// [`apply_listing`](Self::apply_listing).
    pub fn finish_submit(&mut self, result: Result<FileRecord, CoreError>) -> Notice {
        self.uploading = false;
        match result {
            Ok(record) => {
                tracing::info!(name = %record.name, "upload finished");
                self.selected = None;
                self.message = Some(MSG_UPLOAD_OK.to_string());
                Notice::success(MSG_UPLOAD_OK)
            }
            Err(e) => {
                tracing::error!(error = %e, "Upload failed");
                self.message = Some(MSG_UPLOAD_FAILED.to_string());
                Notice::error(MSG_UPLOAD_FAILED)
            }
        }
    }

    /// Ticket for a file listing request about to be sent.
    pub fn begin_listing(&mut self) -> u64 {
        self.listing_ticket += 1;
        self.listing_ticket
    }

    /// Replace the file list with the listing issued under `ticket`.
    ///
    /// A listing older than the one already shown is discarded and `false`
    /// is returned. Failures keep the current list.
    pub fn apply_listing(
        &mut self,
        ticket: u64,
        result: Result<Vec<FileRecord>, CoreError>,
    ) -> bool {
        if ticket <= self.applied_listing {
            tracing::debug!(ticket, applied = self.applied_listing, "discarding stale file listing");
            return false;
        }
        match result {
            Ok(files) => {
                self.files = files;
                self.applied_listing = ticket;
            }
            Err(e) => tracing::warn!(error = %e, "Failed to fetch files"),
        }
        true
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Label of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.uploading {
            "Uploading..."
        } else {
            "Upload"
        }
    }
}
