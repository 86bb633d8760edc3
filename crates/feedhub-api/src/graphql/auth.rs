//! Signup and login mutations.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use feedhub_service::AuthService;

use super::error::GraphqlResultExt;
use super::types::{GqlAuthData, GqlUser, UserInputData};

#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    async fn create_user(&self, ctx: &Context<'_>, user_input: UserInputData) -> Result<GqlUser> {
        let user = ctx
            .data::<Arc<AuthService>>()?
            .signup(user_input.into())
            .await
            .gql()?;
        Ok(user.into())
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<GqlAuthData> {
        let result = ctx
            .data::<Arc<AuthService>>()?
            .login(&email, &password)
            .await
            .gql()?;
        Ok(result.into())
    }
}
