//! GraphQL object and input types.

use async_graphql::{InputObject, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use feedhub_core::types::PageResponse;
use feedhub_entity::user::User;
use feedhub_service::{EditUserInput, LoginResult, PostInput, PostView, SignupInput};

/// Author of a post.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Creator")]
pub struct GqlCreator {
    pub id: Uuid,
    pub name: String,
}

/// A feed post.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Post")]
pub struct GqlPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub creator: GqlCreator,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for GqlPost {
    fn from(view: PostView) -> Self {
        Self {
            id: view.id,
            title: view.title,
            content: view.content,
            image_url: view.image_url,
            creator: GqlCreator {
                id: view.creator.id,
                name: view.creator.name,
            },
            created_at: view.created_at,
            updated_at: view.updated_at,
        }
    }
}

/// One page of posts.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "PostData")]
pub struct GqlPostPage {
    pub posts: Vec<GqlPost>,
    pub total_posts: u64,
    pub page: u64,
    pub total_pages: u64,
}

impl From<PageResponse<PostView>> for GqlPostPage {
    fn from(page: PageResponse<PostView>) -> Self {
        Self {
            total_posts: page.total_items,
            page: page.page,
            total_pages: page.total_pages,
            posts: page.items.into_iter().map(GqlPost::from).collect(),
        }
    }
}

/// A user profile. The password hash is never exposed.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "User")]
pub struct GqlUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub status: String,
    /// IDs of the user's posts.
    pub posts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for GqlUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            status: user.status,
            posts: user.posts,
            created_at: user.created_at,
        }
    }
}

/// Result of `login`.
#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "AuthData")]
pub struct GqlAuthData {
    pub token: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

impl From<LoginResult> for GqlAuthData {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            user_id: result.user_id,
            expires_at: result.expires_at,
        }
    }
}

/// Signup form.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UserInputData")]
pub struct UserInputData {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl From<UserInputData> for SignupInput {
    fn from(input: UserInputData) -> Self {
        Self {
            email: input.email,
            name: input.name,
            password: input.password,
        }
    }
}

/// Post create/edit form. `image_url` is the key returned by
/// `PUT /post-image`.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "PostInputData")]
pub struct PostInputData {
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

impl From<PostInputData> for PostInput {
    fn from(input: PostInputData) -> Self {
        Self {
            title: input.title,
            content: input.content,
            image_url: input.image_url,
        }
    }
}

/// Profile changes.
#[derive(Debug, Clone, InputObject)]
#[graphql(name = "UserEditInput")]
pub struct UserEditInput {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl From<UserEditInput> for EditUserInput {
    fn from(input: UserEditInput) -> Self {
        Self {
            name: input.name,
            status: input.status,
        }
    }
}
