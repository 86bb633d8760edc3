//! Feed listing configuration.

use serde::{Deserialize, Serialize};

/// Feed listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Number of posts returned per page.
    #[serde(default = "default_posts_per_page")]
    pub posts_per_page: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            posts_per_page: default_posts_per_page(),
        }
    }
}

fn default_posts_per_page() -> u64 {
    2
}
