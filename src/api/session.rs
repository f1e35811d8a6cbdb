use crate::domain::board::driving_ports::BoardPort;
use crate::domain::session::driving_ports::SessionPort;
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{
    GenericErrorResponse, Json, NotFoundErrorResponse, ValidationErrorResponse,
};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

/// Defines the OpenAPI documentation for the session API
#[derive(OpenApi)]
#[openapi(paths(log_in, current_session, log_out))]
pub struct SessionApi;
/// Constant used to group session endpoints in OpenAPI documentation
pub const SESSION_API_GROUP: &str = "Session";

/// Builds a router for the session routes
pub fn session_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            post(
                |State(app_state): AppState,
                 Json(login_data): Json<dto::session::LoginRequest>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    log_in(login_data, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/",
            get(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let session_service = domain::session::SessionService {};

                current_session(&mut ext_cxn, &session_service).await
            }),
        )
        .route(
            "/",
            delete(|State(app_state): AppState| async move {
                let mut ext_cxn = app_state.ext_cxn.clone();
                let mut board = app_state.board.write().await;

                log_out(&mut *board, &mut ext_cxn).await
            }),
        )
}

#[utoipa::path(
    post,
    path = "/session",
    tag = SESSION_API_GROUP,
    request_body = dto::session::LoginRequest,
    responses(
        (status = 201, description = "Signed in, board loaded from the store", body = dto::user::User),
        (status = 400, response = dto::err_resps::BasicError400),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Signs a user in, persists the session, and loads their board
async fn log_in(
    login_data: dto::session::LoginRequest,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<(StatusCode, Json<dto::user::User>), ErrorResponse> {
    info!("Login attempt for {login_data}");
    login_data
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let session_write = persistence::kv_session_store::KvSessionWriter {};
    let card_read = persistence::kv_card_store::KvCardReader {};
    let item_read = persistence::kv_action_item_store::KvActionItemReader {};

    let login_result = board
        .log_in(
            &login_data.username,
            &login_data.password,
            &mut *ext_cxn,
            &session_write,
            &card_read,
            &item_read,
        )
        .await;
    match login_result {
        Ok(user) => Ok((StatusCode::CREATED, Json(user.into()))),
        Err(port_err) => {
            error!("Login failure: {port_err}");
            Err(GenericErrorResponse(port_err).into())
        }
    }
}

#[utoipa::path(
    get,
    path = "/session",
    tag = SESSION_API_GROUP,
    responses(
        (status = 200, description = "Somebody is signed in", body = dto::user::User),
        (status = 404, response = dto::err_resps::BasicError404),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Reports who is signed in, straight from the persisted session
async fn current_session(
    ext_cxn: &mut impl ExternalConnectivity,
    session_service: &impl SessionPort,
) -> Result<Json<dto::user::User>, ErrorResponse> {
    let session_read = persistence::kv_session_store::KvSessionReader {};

    let session_result = session_service
        .current_user(&mut *ext_cxn, &session_read)
        .await;
    match session_result {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Err(NotFoundErrorResponse.into()),
        Err(port_err) => {
            error!("Session lookup failure: {port_err}");
            Err(GenericErrorResponse(port_err).into())
        }
    }
}

#[utoipa::path(
    delete,
    path = "/session",
    tag = SESSION_API_GROUP,
    responses(
        (status = 200, description = "Signed out, the session is gone from the store"),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Signs the current user out and drops their board state
async fn log_out(
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<StatusCode, ErrorResponse> {
    info!("Signing out the current user");
    let session_write = persistence::kv_session_store::KvSessionWriter {};

    let logout_result = board.log_out(&mut *ext_cxn, &session_write).await;
    match logout_result {
        Ok(()) => Ok(StatusCode::OK),
        Err(port_err) => {
            error!("Logout failure: {port_err}");
            Err(GenericErrorResponse(port_err).into())
        }
    }
}
