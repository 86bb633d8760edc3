//! GraphQL endpoint and GraphiQL page.

use axum::Json;
use axum::extract::State;
use axum::response::Html;

use crate::extractors::OptionalAuth;
use crate::state::AppState;

/// POST /graphql
pub async fn graphql(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    let request = match auth {
        Some(ctx) => request.data(ctx),
        None => request,
    };
    Json(state.schema.execute(request).await)
}

/// GET /graphql
pub async fn graphiql() -> Html<String> {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}
