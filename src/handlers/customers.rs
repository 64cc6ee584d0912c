//! Customer handlers: paginated list, create (with addresses), read, update, delete, delete all.

use super::{json_body, parse_id};
use crate::error::AppError;
use crate::extractors::ListQuery;
use crate::model::CustomerInput;
use crate::response::{Deleted, DeletedCount, MessageWith, PageBody};
use crate::service::{CustomerService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

fn not_found() -> AppError {
    AppError::NotFound("Customer not found".into())
}

pub async fn list(State(state): State<AppState>, query: ListQuery) -> Result<impl IntoResponse, AppError> {
    let page = CustomerService::list(&state.pool, &state.tables, &query.filter, query.pagination).await?;
    let total_pages = page.total_pages();
    Ok(Json(PageBody {
        message: "success",
        total: page.total,
        page: page.pagination.page(),
        total_pages,
        data: page.rows,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let input: CustomerInput = json_body(body)?;
    let (customer, addresses) = RequestValidator::new_customer(&input)?;
    let created = CustomerService::create(&state.pool, &state.tables, &customer, &addresses).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let customer = CustomerService::read(&state.pool, &state.tables, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(customer))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input: CustomerInput = json_body(body)?;
    let fields = RequestValidator::customer(&input)?;
    let customer = CustomerService::update(&state.pool, &state.tables, id, &fields)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(MessageWith {
        message: "Customer updated successfully",
        row: customer,
    }))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let id = CustomerService::delete(&state.pool, &state.tables, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(Deleted {
        message: "Customer deleted successfully",
        id,
    }))
}

pub async fn delete_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let deleted_count = CustomerService::delete_all(&state.pool, &state.tables).await?;
    Ok(Json(DeletedCount {
        message: "All customers deleted successfully",
        deleted_count,
    }))
}
