use crate::domain::board::ActionItemSubmission;
use crate::domain::board::driving_ports::{BoardError, BoardPort};
use crate::external_connections::ExternalConnectivity;
use crate::routing_utils::{BoardErrorResponse, Json, ValidationErrorResponse};
use crate::{AppState, SharedData, domain, dto, persistence};
use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::ErrorResponse;
use axum::routing::{delete, get, post};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use validator::Validate;

/// Defines the OpenAPI documentation for the board API
#[derive(OpenApi)]
#[openapi(paths(
    current_board,
    submit_card,
    delete_card,
    toggle_card_like,
    submit_action_item,
    delete_action_item,
    begin_action_item_edit
))]
pub struct BoardApi;
/// Constant used to group board endpoints in OpenAPI documentation
pub const BOARD_API_GROUP: &str = "Board";

/// Builds a router for all the board routes
pub fn board_routes() -> Router<Arc<SharedData>> {
    Router::new()
        .route(
            "/",
            get(|State(app_state): AppState| async move {
                let board = app_state.board.read().await;
                let today = Local::now().date_naive();

                current_board(today, &*board)
            }),
        )
        .route(
            "/cards",
            post(
                |State(app_state): AppState, Json(card_data): Json<dto::card::NewCard>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    submit_card(card_data, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/cards/:card_id",
            delete(
                |State(app_state): AppState, Path(card_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    delete_card(&card_id, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/cards/:card_id/likes",
            post(
                |State(app_state): AppState, Path(card_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    toggle_card_like(&card_id, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/action-items",
            post(
                |State(app_state): AppState,
                 Json(item_data): Json<dto::action_item::NewActionItem>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    submit_action_item(item_data, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/action-items/:item_id",
            delete(
                |State(app_state): AppState, Path(item_id): Path<String>| async move {
                    let mut ext_cxn = app_state.ext_cxn.clone();
                    let mut board = app_state.board.write().await;

                    delete_action_item(&item_id, &mut *board, &mut ext_cxn).await
                },
            ),
        )
        .route(
            "/action-items/:item_id/edit",
            post(
                |State(app_state): AppState, Path(item_id): Path<String>| async move {
                    let mut board = app_state.board.write().await;

                    begin_action_item_edit(&item_id, &mut *board)
                },
            ),
        )
}

#[utoipa::path(
    get,
    path = "/board",
    tag = BOARD_API_GROUP,
    responses(
        (status = 200, description = "The board as the signed-in user sees it", body = dto::board::BoardView),
        (status = 401, response = dto::err_resps::BasicError401),
    ),
)]
/// Renders the board for the signed-in user, including overdue counts as of today
fn current_board(
    today: NaiveDate,
    board: &impl BoardPort,
) -> Result<Json<dto::board::BoardView>, ErrorResponse> {
    info!("Requested the board");

    let view = board.view(today).map_err(BoardErrorResponse::from)?;
    Ok(Json(view.into()))
}

#[utoipa::path(
    post,
    path = "/board/cards",
    tag = BOARD_API_GROUP,
    request_body = dto::card::NewCard,
    responses(
        (status = 201, description = "Card added, returns the confirmed card collection", body = Vec<dto::card::RetroCard>),
        (status = 400, response = dto::err_resps::BasicError400),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Adds a card to the board on behalf of the signed-in user
async fn submit_card(
    card_data: dto::card::NewCard,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<(StatusCode, Json<Vec<dto::card::RetroCard>>), ErrorResponse> {
    info!("Adding a card to the board");
    card_data
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let card_read = persistence::kv_card_store::KvCardReader {};
    let card_write = persistence::kv_card_store::KvCardWriter {};
    let new_card = domain::card::NewCard::from(card_data);

    let submit_result = board
        .submit_card(&new_card, &mut *ext_cxn, &card_read, &card_write)
        .await;
    if let Err(ref board_err) = submit_result {
        // The login gate rejecting a call isn't a server failure
        match board_err {
            BoardError::Port(_) => error!("Card submission failure: {board_err}"),
            _ => {}
        }
    }

    let confirmed_cards = submit_result.map_err(BoardErrorResponse::from)?;
    Ok((
        StatusCode::CREATED,
        Json(confirmed_cards.into_iter().map(Into::into).collect()),
    ))
}

#[utoipa::path(
    delete,
    path = "/board/cards/{card_id}",
    tag = BOARD_API_GROUP,
    params(
        ("card_id" = String, Path, description = "Identifier of the card to remove"),
    ),
    responses(
        (status = 200, description = "Card removed from the board"),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Removes a card from the board
async fn delete_card(
    card_id: &str,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<StatusCode, ErrorResponse> {
    info!("Removing card {card_id}");
    let card_read = persistence::kv_card_store::KvCardReader {};
    let card_write = persistence::kv_card_store::KvCardWriter {};

    let delete_result = board
        .delete_card(card_id, &mut *ext_cxn, &card_read, &card_write)
        .await;
    if let Err(ref board_err) = delete_result {
        match board_err {
            BoardError::Port(_) => error!("Card removal failure: {board_err}"),
            _ => {}
        }
    }

    delete_result.map_err(BoardErrorResponse::from)?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/board/cards/{card_id}/likes",
    tag = BOARD_API_GROUP,
    params(
        ("card_id" = String, Path, description = "Identifier of the card being liked or unliked"),
    ),
    responses(
        (status = 200, description = "Like toggled, returns the confirmed card collection", body = Vec<dto::card::RetroCard>),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Toggles the signed-in user's like on a card
async fn toggle_card_like(
    card_id: &str,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<Json<Vec<dto::card::RetroCard>>, ErrorResponse> {
    info!("Toggling a like on card {card_id}");
    let card_read = persistence::kv_card_store::KvCardReader {};
    let card_write = persistence::kv_card_store::KvCardWriter {};

    let toggle_result = board
        .toggle_like(card_id, &mut *ext_cxn, &card_read, &card_write)
        .await;
    if let Err(ref board_err) = toggle_result {
        match board_err {
            BoardError::Port(_) => error!("Like toggle failure: {board_err}"),
            _ => {}
        }
    }

    let confirmed_cards = toggle_result.map_err(BoardErrorResponse::from)?;
    Ok(Json(confirmed_cards.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    post,
    path = "/board/action-items",
    tag = BOARD_API_GROUP,
    request_body = dto::action_item::NewActionItem,
    responses(
        (status = 201, description = "A new action item was added, returns the confirmed collection", body = Vec<dto::action_item::ActionItem>),
        (status = 200, description = "The staged action item was rewritten, returns the confirmed collection", body = Vec<dto::action_item::ActionItem>),
        (status = 400, response = dto::err_resps::BasicError400),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Submits the action item form. Creates a new item, or rewrites the staged one
/// when an edit is in progress.
async fn submit_action_item(
    item_data: dto::action_item::NewActionItem,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<(StatusCode, Json<Vec<dto::action_item::ActionItem>>), ErrorResponse> {
    info!("Action item submission");
    item_data
        .validate()
        .map_err(ValidationErrorResponse::from)?;

    let item_read = persistence::kv_action_item_store::KvActionItemReader {};
    let item_write = persistence::kv_action_item_store::KvActionItemWriter {};
    let draft = domain::action_item::ActionItemDraft::from(item_data);

    let submit_result = board
        .submit_action_item(&draft, &mut *ext_cxn, &item_read, &item_write)
        .await;
    if let Err(ref board_err) = submit_result {
        match board_err {
            BoardError::Port(_) => error!("Action item submission failure: {board_err}"),
            _ => {}
        }
    }

    let (status, items) = match submit_result.map_err(BoardErrorResponse::from)? {
        ActionItemSubmission::Created(items) => (StatusCode::CREATED, items),
        ActionItemSubmission::Updated(items) => (StatusCode::OK, items),
    };

    Ok((status, Json(items.into_iter().map(Into::into).collect())))
}

#[utoipa::path(
    delete,
    path = "/board/action-items/{item_id}",
    tag = BOARD_API_GROUP,
    params(
        ("item_id" = String, Path, description = "Identifier of the action item to remove"),
    ),
    responses(
        (status = 200, description = "Action item removed from the board"),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 500, response = dto::err_resps::BasicError500),
    ),
)]
/// Removes an action item from the board
async fn delete_action_item(
    item_id: &str,
    board: &mut impl BoardPort,
    ext_cxn: &mut impl ExternalConnectivity,
) -> Result<StatusCode, ErrorResponse> {
    info!("Removing action item {item_id}");
    let item_read = persistence::kv_action_item_store::KvActionItemReader {};
    let item_write = persistence::kv_action_item_store::KvActionItemWriter {};

    let delete_result = board
        .delete_action_item(item_id, &mut *ext_cxn, &item_read, &item_write)
        .await;
    if let Err(ref board_err) = delete_result {
        match board_err {
            BoardError::Port(_) => error!("Action item removal failure: {board_err}"),
            _ => {}
        }
    }

    delete_result.map_err(BoardErrorResponse::from)?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/board/action-items/{item_id}/edit",
    tag = BOARD_API_GROUP,
    params(
        ("item_id" = String, Path, description = "Identifier of the action item to stage for editing"),
    ),
    responses(
        (status = 200, description = "Item staged, returns the fields loaded into the form", body = dto::action_item::ActionItemDraft),
        (status = 401, response = dto::err_resps::BasicError401),
        (status = 404, response = dto::err_resps::BasicError404),
    ),
)]
/// Stages an action item's fields in the form for editing
fn begin_action_item_edit(
    item_id: &str,
    board: &mut impl BoardPort,
) -> Result<Json<dto::action_item::ActionItemDraft>, ErrorResponse> {
    info!("Staging action item {item_id} for editing");

    let staged_fields = board
        .begin_edit_action_item(item_id)
        .map_err(BoardErrorResponse::from)?;
    Ok(Json(staged_fields.into()))
}
