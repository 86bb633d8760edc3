//! User self-service operations: profile viewing, status and name changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use feedhub_core::error::{AppError, FieldError};
use feedhub_database::UserStore;
use feedhub_entity::user::{UpdateUser, User};

use crate::context::RequestContext;

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditUserInput {
    /// New display name.
    pub name: Option<String>,
    /// New status line.
    pub status: Option<String>,
}

/// Handles user self-service operations.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// The current user's full profile.
    pub async fn get_user(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.users
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))
    }

    /// The current user's status line.
    pub async fn get_status(&self, ctx: &RequestContext) -> Result<String, AppError> {
        Ok(self.get_user(ctx).await?.status)
    }

    /// Replace the current user's status line.
    pub async fn update_status(&self, ctx: &RequestContext, status: &str) -> Result<User, AppError> {
        self.edit_user(
            ctx,
            EditUserInput {
                name: None,
                status: Some(status.to_string()),
            },
        )
        .await
    }

    /// Change the name and/or status of the current user.
    pub async fn edit_user(
        &self,
        ctx: &RequestContext,
        input: EditUserInput,
    ) -> Result<User, AppError> {
        let mut errors = Vec::new();
        let name = non_empty("name", input.name, &mut errors);
        let status = non_empty("status", input.status, &mut errors);
        if !errors.is_empty() {
            return Err(AppError::invalid_fields("Validation failed.", errors));
        }

        let user = self
            .users
            .update(&UpdateUser {
                id: ctx.user_id,
                name,
                status,
            })
            .await?;

        info!(user_id = %ctx.user_id, "User profile updated");
        Ok(user)
    }
}

fn non_empty(field: &str, value: Option<String>, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = value.map(|v| v.trim().to_string())?;
    if value.is_empty() {
        errors.push(FieldError::new(field, format!("{} must not be empty.", capitalize(field))));
        return None;
    }
    Some(value)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
