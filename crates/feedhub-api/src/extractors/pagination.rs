//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

/// Query parameters of `GET /feed/posts`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PostsQuery {
    /// Page number (1-based, default: 1).
    pub page: Option<u64>,
}

impl PostsQuery {
    /// The requested page, never below 1.
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}
