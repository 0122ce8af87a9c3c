//! Tests for the trade-list endpoints: the toggle's status codes and
//! owner-scoped not-found behavior, the trade-list view, and the bulk clear.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Form,
};
use tradelist::{
    controller::trade::{
        clear_trade_list, clear_trade_list_redirect, toggle_trade_list, trade_list, ToggleForm,
    },
    data::character::CharacterRepository,
    model::{app::AppState, query::ListParams, session::SessionOwnerId},
};
use tradelist_test_utils::prelude::*;

/// Expect 200 OK with success status when toggling an owned record
#[tokio::test]
async fn toggle_success_for_owned_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 2)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    SessionOwnerId::insert(&test.session, "owner-a").await.unwrap();

    let records = CharacterRepository::new(&test.db)
        .list_for_owner("owner-a", None, false)
        .await?;

    let form = ToggleForm {
        character_id: Some(records[0].id.to_string()),
    };

    let result = toggle_trade_list(State(state), test.session.clone(), Form(form)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect 404 for a record owned by another tenant
#[tokio::test]
async fn toggle_not_found_for_foreign_record() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-b", 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    SessionOwnerId::insert(&test.session, "owner-a").await.unwrap();

    let records = CharacterRepository::new(&test.db)
        .list_for_owner("owner-b", None, false)
        .await?;

    let form = ToggleForm {
        character_id: Some(records[0].id.to_string()),
    };

    let result = toggle_trade_list(State(state), test.session.clone(), Form(form)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect 400 when character_id is missing or not numeric
#[tokio::test]
async fn toggle_bad_request_for_malformed_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_character_table().build().await?;
    let state: AppState = test.to_app_state();

    let form = ToggleForm {
        character_id: Some("not-a-number".to_string()),
    };

    let result = toggle_trade_list(State(state.clone()), test.session.clone(), Form(form)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let form = ToggleForm { character_id: None };

    let result = toggle_trade_list(State(state), test.session.clone(), Form(form)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 200 OK for the trade-list view
#[tokio::test]
async fn trade_list_view_success() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 3)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    SessionOwnerId::insert(&test.session, "owner-a").await.unwrap();

    let result = trade_list(
        State(state),
        test.session.clone(),
        Query(ListParams::default()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    Ok(())
}

/// Expect POST clear to unflag records and redirect, and GET to redirect
/// without mutating
#[tokio::test]
async fn clear_trade_list_redirects() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_owner_characters("owner-a", 2)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    SessionOwnerId::insert(&test.session, "owner-a").await.unwrap();

    let repository = CharacterRepository::new(&test.db);
    let records = repository.list_for_owner("owner-a", None, false).await?;
    repository
        .toggle_trade_list("owner-a", records[0].id)
        .await?;

    let resp = clear_trade_list_redirect().await.into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(repository.list_for_owner("owner-a", None, true).await?.len(), 1);

    let result = clear_trade_list(State(state), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(repository.list_for_owner("owner-a", None, true).await?.is_empty());

    Ok(())
}
