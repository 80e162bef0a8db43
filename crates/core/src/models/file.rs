use serde::{Deserialize, Serialize};

/// Archive extensions accepted by the upload flow (compared lowercase).
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".zip", ".rar"];

/// A stored archive, as listed by `GET /files`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Backend document id (`_id` on the wire)
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Original file name at upload time
    pub name: String,

    /// Public download URL at the storage provider
    pub url: String,
}

/// Body of `POST /files/save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFileRequest {
    pub name: String,
    pub url: String,
}

/// A file picked by the user but not uploaded yet.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// True when the name ends with `.zip` or `.rar`, ignoring case.
    pub fn has_allowed_extension(&self) -> bool {
        let lower = self.name.to_lowercase();
        ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .finish()
    }
}
