//! Post queries and mutations.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use feedhub_service::FeedService;

use super::error::{GraphqlResultExt, require_user};
use super::types::{GqlPost, GqlPostPage, PostInputData};

#[derive(Default)]
pub struct FeedQuery;

#[Object]
impl FeedQuery {
    /// A page of posts, newest first.
    async fn posts(&self, ctx: &Context<'_>, page: Option<i32>) -> Result<GqlPostPage> {
        require_user(ctx)?;
        let page = u64::try_from(page.unwrap_or(1)).unwrap_or(1).max(1);
        let posts = ctx.data::<Arc<FeedService>>()?.list_posts(page).await.gql()?;
        Ok(posts.into())
    }

    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<GqlPost> {
        require_user(ctx)?;
        let post = ctx.data::<Arc<FeedService>>()?.get_post(id).await.gql()?;
        Ok(post.into())
    }
}

#[derive(Default)]
pub struct FeedMutation;

#[Object]
impl FeedMutation {
    async fn create_post(&self, ctx: &Context<'_>, post_input: PostInputData) -> Result<GqlPost> {
        let user = require_user(ctx)?;
        let post = ctx
            .data::<Arc<FeedService>>()?
            .create_post(user, post_input.into(), None)
            .await
            .gql()?;
        Ok(post.into())
    }

    async fn update_post(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        post_input: PostInputData,
    ) -> Result<GqlPost> {
        let user = require_user(ctx)?;
        let post = ctx
            .data::<Arc<FeedService>>()?
            .update_post(user, id, post_input.into(), None)
            .await
            .gql()?;
        Ok(post.into())
    }

    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let user = require_user(ctx)?;
        ctx.data::<Arc<FeedService>>()?
            .delete_post(user, id)
            .await
            .gql()?;
        Ok(true)
    }
}
