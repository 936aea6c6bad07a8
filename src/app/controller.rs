//! HTTP handlers for the items API.
//!
//! Each handler is a controller call site: the request is logged before the
//! handler body runs and the `ResponseEntity` after it returns.

use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::service::{Item, ItemError, NewItem};
use crate::app::AppState;
use crate::http::response::ResponseEntity;
use crate::interceptor::{arg, CallSite, Marker};

const LIST_ITEMS: CallSite = CallSite::controller("list_items");
const GET_ITEM: CallSite = CallSite::controller("get_item").timed();
const CREATE_ITEM: CallSite = CallSite::controller("create_item");
const DELETE_ITEM: CallSite = CallSite::controller("delete_item");
const COUNT_ITEMS: CallSite = CallSite::new("count_items").marked(Marker::LoggableResponse);

/// Unwrap an outcome whose error type has no values.
fn settle<T>(outcome: Result<T, Infallible>) -> T {
    match outcome {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

pub async fn list_items(State(state): State<AppState>) -> ResponseEntity<Vec<Item>> {
    let logger = state.logger.load_full();
    let items = &state.items;
    let outcome = logger
        .intercept(&LIST_ITEMS, &[], || async move {
            Ok::<_, Infallible>(ResponseEntity::ok(settle(items.list())))
        })
        .await;
    settle(outcome)
}

pub async fn get_item(State(state): State<AppState>, Path(id): Path<u64>) -> ResponseEntity<Item> {
    let logger = state.logger.load_full();
    let items = &state.items;
    let outcome = logger
        .intercept(&GET_ITEM, &[arg(&id)], || async move {
            let response = match settle(items.find(id)) {
                Some(item) => ResponseEntity::ok(item),
                None => ResponseEntity::not_found(),
            };
            Ok::<_, Infallible>(response)
        })
        .await;
    settle(outcome)
}

pub async fn create_item(
    State(state): State<AppState>,
    Json(new_item): Json<NewItem>,
) -> ResponseEntity<Item> {
    let logger = state.logger.load_full();
    let items = &state.items;
    let body = &new_item;
    let outcome = logger
        .intercept(&CREATE_ITEM, &[arg(body)], || async move {
            let response = match items.create(body) {
                Ok(item) => ResponseEntity::created(item),
                Err(ItemError::EmptyName) => ResponseEntity::new(StatusCode::BAD_REQUEST, None),
                Err(ItemError::NotFound(_)) => ResponseEntity::not_found(),
            };
            Ok::<_, Infallible>(response)
        })
        .await;
    settle(outcome)
}

pub async fn delete_item(State(state): State<AppState>, Path(id): Path<u64>) -> ResponseEntity<()> {
    let logger = state.logger.load_full();
    let items = &state.items;
    let outcome = logger
        .intercept(&DELETE_ITEM, &[arg(&id)], || async move {
            let response = match items.delete(id) {
                Ok(()) => ResponseEntity::no_content(),
                Err(ItemError::NotFound(_)) => ResponseEntity::not_found(),
                Err(ItemError::EmptyName) => ResponseEntity::new(StatusCode::BAD_REQUEST, None),
            };
            Ok::<_, Infallible>(response)
        })
        .await;
    settle(outcome)
}

pub async fn count_items(State(state): State<AppState>) -> Json<usize> {
    let logger = state.logger.load_full();
    let items = &state.items;
    let outcome = logger
        .intercept(&COUNT_ITEMS, &[], || async move {
            Ok::<_, Infallible>(Json(settle(items.list()).len()))
        })
        .await;
    settle(outcome)
}
