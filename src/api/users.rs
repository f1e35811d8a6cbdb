use crate::routing_utils::Json;
use crate::{SharedData, domain, dto};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

/// Defines the OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(paths(get_users))]
pub struct UsersApi;
/// Constant used to group user endpoints in OpenAPI documentation
pub const USERS_API_GROUP: &str = "Users";

/// Builds a router for the user routes
pub fn user_routes() -> Router<Arc<SharedData>> {
    Router::new().route("/", get(|| async { get_users() }))
}

#[utoipa::path(
    get,
    path = "/users",
    tag = USERS_API_GROUP,
    responses(
        (status = 200, description = "The fixed team roster", body = Vec<dto::user::User>),
    ),
)]
/// Lists the team members shown in assignee pickers and like indicators
fn get_users() -> Json<Vec<dto::user::User>> {
    info!("Requested users");

    let roster = domain::user::team_roster();
    Json(roster.into_iter().map(Into::into).collect())
}
