//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tracing::info;

use feedhub_auth::jwt::{JwtDecoder, JwtEncoder};
use feedhub_auth::password::{PasswordHasher, PasswordValidator};
use feedhub_core::config::AppConfig;
use feedhub_core::result::AppResult;
use feedhub_database::Stores;
use feedhub_realtime::RealtimeEngine;
use feedhub_service::{AuthService, FeedService, ImageService, UserService};
use feedhub_storage::ImageStore;

use crate::graphql::{FeedSchema, build_schema};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// User and post stores
    pub stores: Stores,
    /// Post image storage
    pub images: Arc<ImageStore>,
    /// WebSocket realtime engine
    pub realtime: Arc<RealtimeEngine>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Signup and login
    pub auth_service: Arc<AuthService>,
    /// Post CRUD
    pub feed_service: Arc<FeedService>,
    /// Profile and status
    pub user_service: Arc<UserService>,
    /// Image upload endpoint
    pub image_service: Arc<ImageService>,

    // ── GraphQL ──────────────────────────────────────────────
    /// Executable schema
    pub schema: FeedSchema,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("stores", &self.stores)
            .field("realtime", &self.realtime)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire every service over `stores`.
    pub async fn build(config: AppConfig, stores: Stores) -> AppResult<Self> {
        let images = Arc::new(ImageStore::from_config(&config.storage).await?);
        let realtime = Arc::new(RealtimeEngine::new(&config.realtime));

        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let password_hasher = Arc::new(PasswordHasher::new());
        let password_validator = Arc::new(PasswordValidator::new(&config.auth));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&stores.users),
            password_hasher,
            password_validator,
            jwt_encoder,
        ));
        let feed_service = Arc::new(FeedService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.posts),
            Arc::clone(&images),
            realtime.publisher(),
            &config.feed,
        ));
        let user_service = Arc::new(UserService::new(Arc::clone(&stores.users)));
        let image_service = Arc::new(ImageService::new(
            Arc::clone(&stores.posts),
            Arc::clone(&images),
        ));

        let schema = build_schema(
            Arc::clone(&auth_service),
            Arc::clone(&feed_service),
            Arc::clone(&user_service),
        );

        info!(store = stores.backend(), "Application state initialized");

        Ok(Self {
            config: Arc::new(config),
            stores,
            images,
            realtime,
            jwt_decoder,
            auth_service,
            feed_service,
            user_service,
            image_service,
            schema,
        })
    }
}
