use axum::Router;
use axum::http::StatusCode;
use chrono::Local;
use serde_json::json;
use tower::ServiceExt;

use super::test_util::{build_app, empty_request, json_request, prepare_store_and_test};
use crate::api::test_util::deserialize_body;
use crate::dto;
use crate::routing_utils::BasicErrorResponse;

async fn log_in_as(app: &Router, username: &str) {
    let login_response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/session",
            json!({ "username": username, "password": "hunter2" }),
        ))
        .await
        .expect("the login request should complete");
    assert_eq!(StatusCode::CREATED, login_response.status());
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn the_board_requires_a_login() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        assert_eq!(StatusCode::UNAUTHORIZED, board_response.status());
        let error_body: BasicErrorResponse = deserialize_body(board_response.into_body()).await;
        assert_eq!("unauthorized", error_body.error_code);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn submitted_cards_carry_the_resolved_author() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;

        let signed_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/cards",
                json!({ "type": "good", "content": "Great sprint", "isAnonymous": false }),
            ))
            .await
            .expect("the card submission should complete");
        assert_eq!(StatusCode::CREATED, signed_response.status());
        let cards_after_first: Vec<dto::card::RetroCard> =
            deserialize_body(signed_response.into_body()).await;
        let [signed_card] = cards_after_first.as_slice() else {
            panic!("Expected exactly one card, instead got this: {cards_after_first:#?}");
        };
        assert_eq!("alice", signed_card.author);
        assert!(!signed_card.is_anonymous);
        assert!(signed_card.likes.is_empty());

        let anonymous_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/cards",
                json!({ "type": "bad", "content": "Flaky tests", "isAnonymous": true }),
            ))
            .await
            .expect("the card submission should complete");
        assert_eq!(StatusCode::CREATED, anonymous_response.status());

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        assert_eq!(StatusCode::OK, board_response.status());
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!("alice", view.user.name);
        assert_eq!(2, view.cards.len());
        let anonymous_author = view
            .cards
            .iter()
            .find(|card| card.content == "Flaky tests")
            .map(|card| card.author.as_str());
        assert_eq!(Some("Anonymous"), anonymous_author);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn toggling_a_like_twice_restores_the_card() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;

        let submit_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/cards",
                json!({ "type": "keep", "content": "Daily demos", "isAnonymous": false }),
            ))
            .await
            .expect("the card submission should complete");
        let submitted_cards: Vec<dto::card::RetroCard> =
            deserialize_body(submit_response.into_body()).await;
        let [card] = submitted_cards.as_slice() else {
            panic!("Expected exactly one card, instead got this: {submitted_cards:#?}");
        };
        let like_path = format!("/board/cards/{}/likes", card.id);

        let first_toggle = app
            .clone()
            .oneshot(empty_request("POST", &like_path))
            .await
            .expect("the like request should complete");
        assert_eq!(StatusCode::OK, first_toggle.status());
        let liked_cards: Vec<dto::card::RetroCard> =
            deserialize_body(first_toggle.into_body()).await;
        assert!(
            matches!(liked_cards.as_slice(), [only] if only.likes == ["0"]),
            "Expected the user's like to land on the card, instead got this: {liked_cards:#?}"
        );

        let second_toggle = app
            .oneshot(empty_request("POST", &like_path))
            .await
            .expect("the like request should complete");
        assert_eq!(StatusCode::OK, second_toggle.status());
        let unliked_cards: Vec<dto::card::RetroCard> =
            deserialize_body(second_toggle.into_body()).await;
        assert!(
            matches!(unliked_cards.as_slice(), [only] if only.likes.is_empty()),
            "Expected the like to come back off, instead got this: {unliked_cards:#?}"
        );
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn deleting_a_card_removes_it_from_the_board() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;

        let submit_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/cards",
                json!({ "type": "change", "content": "Too many meetings", "isAnonymous": false }),
            ))
            .await
            .expect("the card submission should complete");
        let submitted_cards: Vec<dto::card::RetroCard> =
            deserialize_body(submit_response.into_body()).await;
        let [card] = submitted_cards.as_slice() else {
            panic!("Expected exactly one card, instead got this: {submitted_cards:#?}");
        };

        let delete_response = app
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/board/cards/{}", card.id),
            ))
            .await
            .expect("the delete request should complete");
        assert_eq!(StatusCode::OK, delete_response.status());

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert!(view.cards.is_empty());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn overdue_counts_follow_the_calendar() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;
        let yesterday = Local::now()
            .date_naive()
            .pred_opt()
            .expect("there is always a yesterday")
            .format("%Y-%m-%d")
            .to_string();

        let overdue_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/action-items",
                json!({ "assignee": "Bob", "dueDate": yesterday, "content": "Book the retro room" }),
            ))
            .await
            .expect("the item submission should complete");
        assert_eq!(StatusCode::CREATED, overdue_response.status());
        let items_after_first: Vec<dto::action_item::ActionItem> =
            deserialize_body(overdue_response.into_body()).await;
        let [overdue_item] = items_after_first.as_slice() else {
            panic!("Expected exactly one item, instead got this: {items_after_first:#?}");
        };
        let overdue_item_id = overdue_item.id.clone();

        let undated_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/action-items",
                json!({ "assignee": "Charlie", "content": "Follow up with the platform team" }),
            ))
            .await
            .expect("the item submission should complete");
        assert_eq!(StatusCode::CREATED, undated_response.status());

        let board_response = app
            .clone()
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!(2, view.total_action_items);
        assert_eq!(1, view.overdue_action_items);

        let delete_response = app
            .clone()
            .oneshot(empty_request(
                "DELETE",
                &format!("/board/action-items/{overdue_item_id}"),
            ))
            .await
            .expect("the delete request should complete");
        assert_eq!(StatusCode::OK, delete_response.status());

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!(1, view.total_action_items);
        assert_eq!(0, view.overdue_action_items);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn editing_an_action_item_rewrites_it_in_place() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;

        let create_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/action-items",
                json!({ "assignee": "Alice", "dueDate": "", "content": "Book the retro room" }),
            ))
            .await
            .expect("the item submission should complete");
        assert_eq!(StatusCode::CREATED, create_response.status());
        let created_items: Vec<dto::action_item::ActionItem> =
            deserialize_body(create_response.into_body()).await;
        let [item] = created_items.as_slice() else {
            panic!("Expected exactly one item, instead got this: {created_items:#?}");
        };
        let item_id = item.id.clone();

        let stage_response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/board/action-items/{item_id}/edit"),
            ))
            .await
            .expect("the edit request should complete");
        assert_eq!(StatusCode::OK, stage_response.status());
        let staged: dto::action_item::ActionItemDraft =
            deserialize_body(stage_response.into_body()).await;
        assert_eq!("Alice", staged.assignee);
        assert_eq!("Book the retro room", staged.content);

        let board_response = app
            .clone()
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!(Some(item_id.clone()), view.editing_item_id);

        let update_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/action-items",
                json!({ "assignee": "Charlie", "dueDate": "", "content": "Book the bigger retro room" }),
            ))
            .await
            .expect("the item submission should complete");
        assert_eq!(StatusCode::OK, update_response.status());
        let updated_items: Vec<dto::action_item::ActionItem> =
            deserialize_body(update_response.into_body()).await;
        assert!(
            matches!(updated_items.as_slice(), [only]
                if only.id == item_id && only.assignee == "Charlie"),
            "Expected the staged item to be rewritten, instead got this: {updated_items:#?}"
        );

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!(None, view.editing_item_id);
        assert_eq!(1, view.total_action_items);
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn logging_out_locks_the_board_again() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn).await;
        log_in_as(&app, "alice").await;

        let board_response = app
            .clone()
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        assert_eq!(StatusCode::OK, board_response.status());

        let logout_response = app
            .clone()
            .oneshot(empty_request("DELETE", "/session"))
            .await
            .expect("the logout request should complete");
        assert_eq!(StatusCode::OK, logout_response.status());

        let board_response = app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        assert_eq!(StatusCode::UNAUTHORIZED, board_response.status());
    });
}

#[test]
#[cfg_attr(not(feature = "integration_test"), ignore)]
fn board_state_survives_a_relaunch() {
    prepare_store_and_test(|ext_cxn| async move {
        let app = build_app(ext_cxn.clone()).await;
        log_in_as(&app, "alice").await;

        let card_response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/board/cards",
                json!({ "type": "good", "content": "Great sprint", "isAnonymous": false }),
            ))
            .await
            .expect("the card submission should complete");
        assert_eq!(StatusCode::CREATED, card_response.status());
        let item_response = app
            .oneshot(json_request(
                "POST",
                "/board/action-items",
                json!({ "assignee": "Bob", "dueDate": "", "content": "Write up the incident" }),
            ))
            .await
            .expect("the item submission should complete");
        assert_eq!(StatusCode::CREATED, item_response.status());

        let relaunched_app = build_app(ext_cxn).await;
        let board_response = relaunched_app
            .oneshot(empty_request("GET", "/board"))
            .await
            .expect("the board request should complete");
        assert_eq!(StatusCode::OK, board_response.status());
        let view: dto::board::BoardView = deserialize_body(board_response.into_body()).await;
        assert_eq!("alice", view.user.name);
        assert!(
            matches!(view.cards.as_slice(), [only] if only.content == "Great sprint"),
            "Expected the stored card to come back, instead got this: {:#?}",
            view.cards
        );
        assert_eq!(1, view.total_action_items);
    });
}
