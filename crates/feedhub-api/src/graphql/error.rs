//! Conversion of domain errors into GraphQL errors.

use async_graphql::{Context, ErrorExtensions, Value};

use feedhub_core::error::AppError;
use feedhub_service::RequestContext;

use crate::error::{public_message, status_for};

/// Convert an [`AppError`] into a GraphQL error.
///
/// Extensions carry `code` (the HTTP status the REST API would use) and,
/// for validation failures, `data` with the field errors.
pub fn to_graphql_error(err: AppError) -> async_graphql::Error {
    let code = i32::from(status_for(err.kind).as_u16());
    let message = public_message(&err);
    let data = if err.field_errors.is_empty() {
        None
    } else {
        serde_json::to_value(&err.field_errors)
            .ok()
            .and_then(|json| Value::from_json(json).ok())
    };

    async_graphql::Error::new(message).extend_with(|_, ext| {
        ext.set("code", code);
        if let Some(data) = data {
            ext.set("data", data);
        }
    })
}

/// `?`-friendly conversion that keeps the error extensions.
///
/// Plain `?` on an [`AppError`] drops the extensions.
pub trait GraphqlResultExt<T> {
    /// Map the error side with [`to_graphql_error`].
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> GraphqlResultExt<T> for Result<T, AppError> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(to_graphql_error)
    }
}

/// The authenticated caller, or a `code: 401` error.
pub fn require_user<'a>(ctx: &'a Context<'_>) -> async_graphql::Result<&'a RequestContext> {
    ctx.data_opt::<RequestContext>()
        .ok_or_else(|| to_graphql_error(AppError::authentication("Not authenticated!")))
}
