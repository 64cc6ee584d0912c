//! Address handlers. Create and list are scoped by customer id; read, update and delete by address id.

use super::{json_body, parse_id};
use crate::error::AppError;
use crate::model::AddressInput;
use crate::response::{DataBody, Deleted, MessageWith};
use crate::service::{AddressService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn not_found() -> AppError {
    AppError::NotFound("Address not found".into())
}

fn customer_not_found() -> AppError {
    AppError::NotFound("Customer not found".into())
}

pub async fn create(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let customer_id = parse_id(&customer_id)?;
    let input: AddressInput = json_body(body)?;
    let fields = RequestValidator::address(&input)?;
    let address = AddressService::create(&state.pool, &state.tables, customer_id, &fields)
        .await?
        .ok_or_else(customer_not_found)?;
    Ok((StatusCode::CREATED, Json(address)))
}

pub async fn list_for_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let customer_id = parse_id(&customer_id)?;
    let data = AddressService::list_for_customer(&state.pool, &state.tables, customer_id)
        .await?
        .ok_or_else(customer_not_found)?;
    Ok(Json(DataBody { data }))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let address = AddressService::read(&state.pool, &state.tables, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(address))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: AddressInput = json_body(body)?;
    let fields = RequestValidator::address(&input)?;
    let address = AddressService::update(&state.pool, &state.tables, id, &fields)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(MessageWith {
        message: "Address updated successfully",
        row: address,
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let id = AddressService::delete(&state.pool, &state.tables, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(Deleted {
        message: "Address deleted successfully",
        id,
    }))
}
