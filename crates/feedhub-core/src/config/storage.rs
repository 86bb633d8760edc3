//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Image storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored images.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum accepted image size in bytes (default 10 MB).
    #[serde(default = "default_max_image_size")]
    pub max_image_size_bytes: u64,
    /// MIME types accepted for post images.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_image_size_bytes: default_max_image_size(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_root_path() -> String {
    "./data".to_string()
}

fn default_max_image_size() -> u64 {
    10_485_760 // 10 MB
}

fn default_allowed_mime_types() -> Vec<String> {
    ["image/png", "image/jpg", "image/jpeg"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}
