//! Shared fixtures for service tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use feedhub_auth::jwt::{JwtDecoder, JwtEncoder};
use feedhub_auth::password::{PasswordHasher, PasswordValidator};
use feedhub_core::config::AppConfig;
use feedhub_core::events::DomainEvent;
use feedhub_core::traits::EventPublisher;
use feedhub_database::Stores;
use feedhub_storage::ImageStore;

use crate::{
    AuthService, FeedService, ImageService, ImageUpload, PostInput, PostView, RequestContext,
    SignupInput, UserService,
};

pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

pub fn png_upload(name: &str) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        content_type: Some("image/png".to_string()),
        data: Bytes::from_static(PNG),
    }
}

/// Publisher that keeps every event for inspection.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<DomainEvent>>,
}

impl RecordingPublisher {
    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, event: DomainEvent) {
        self.events.lock().await.push(event);
    }
}

pub struct Harness {
    pub auth: AuthService,
    pub feed: FeedService,
    pub user: UserService,
    pub image: ImageService,
    pub images: Arc<ImageStore>,
    pub publisher: Arc<RecordingPublisher>,
    pub decoder: JwtDecoder,
    _dir: tempfile::TempDir,
}

impl Harness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "test-secret".to_string();
        config.storage.root_path = dir.path().to_string_lossy().to_string();

        let stores = Stores::in_memory();
        let images = Arc::new(ImageStore::from_config(&config.storage).await.unwrap());
        let publisher = Arc::new(RecordingPublisher::default());

        let auth = AuthService::new(
            Arc::clone(&stores.users),
            Arc::new(PasswordHasher::new()),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
        );
        let feed = FeedService::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.posts),
            Arc::clone(&images),
            Arc::clone(&publisher) as Arc<dyn EventPublisher>,
            &config.feed,
        );
        let user = UserService::new(Arc::clone(&stores.users));
        let image = ImageService::new(Arc::clone(&stores.posts), Arc::clone(&images));

        Self {
            auth,
            feed,
            user,
            image,
            images,
            publisher,
            decoder: JwtDecoder::new(&config.auth),
            _dir: dir,
        }
    }

    pub async fn signup(&self, email: &str) -> RequestContext {
        let user = self
            .auth
            .signup(SignupInput {
                email: email.to_string(),
                name: "Max".to_string(),
                password: "secret123".to_string(),
            })
            .await
            .unwrap();
        RequestContext::new(user.id, user.email)
    }

    pub async fn create_post(&self, ctx: &RequestContext, title: &str) -> PostView {
        self.feed
            .create_post(
                ctx,
                PostInput {
                    title: title.to_string(),
                    content: "Some interesting content".to_string(),
                    image_url: None,
                },
                Some(png_upload("photo.png")),
            )
            .await
            .unwrap()
    }
}
