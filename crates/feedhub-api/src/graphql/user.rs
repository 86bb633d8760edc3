//! Profile query and mutation.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use feedhub_service::UserService;

use super::error::{GraphqlResultExt, require_user};
use super::types::{GqlUser, UserEditInput};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// The authenticated user.
    async fn user(&self, ctx: &Context<'_>) -> Result<GqlUser> {
        let caller = require_user(ctx)?;
        let user = ctx.data::<Arc<UserService>>()?.get_user(caller).await.gql()?;
        Ok(user.into())
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    async fn edit_user(&self, ctx: &Context<'_>, user_input: UserEditInput) -> Result<GqlUser> {
        let caller = require_user(ctx)?;
        let user = ctx
            .data::<Arc<UserService>>()?
            .edit_user(caller, user_input.into())
            .await
            .gql()?;
        Ok(user.into())
    }
}
