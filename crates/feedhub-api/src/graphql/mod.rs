//! GraphQL schema served at `/graphql`.
//!
//! Authentication is soft: the HTTP handler attaches a
//! [`RequestContext`](feedhub_service::RequestContext) when a valid token
//! was sent, and resolvers that need a user fail with `code: 401`.

pub mod auth;
pub mod error;
pub mod feed;
pub mod types;
pub mod user;

use std::sync::Arc;

use async_graphql::{EmptySubscription, MergedObject, Schema};

use feedhub_service::{AuthService, FeedService, UserService};

/// Root query object.
#[derive(MergedObject, Default)]
pub struct QueryRoot(feed::FeedQuery, user::UserQuery);

/// Root mutation object.
#[derive(MergedObject, Default)]
pub struct MutationRoot(auth::AuthMutation, feed::FeedMutation, user::UserMutation);

/// The executable FeedHub schema.
pub type FeedSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services resolvers read from context.
pub fn build_schema(
    auth: Arc<AuthService>,
    feed: Arc<FeedService>,
    user: Arc<UserService>,
) -> FeedSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(auth)
        .data(feed)
        .data(user)
        .finish()
}
