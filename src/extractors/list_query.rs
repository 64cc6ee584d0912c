//! Extract the customer-list query (`search`, `city`, `page`, `limit`) from the query string.

use crate::error::AppError;
use crate::service::Pagination;
use crate::sql::CustomerFilter;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use std::collections::HashMap;

/// Filter and page of GET /customers. Non-numeric `page`/`limit` are rejected with 400;
/// numeric ones are clamped by [`Pagination`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: CustomerFilter,
    pub pagination: Pagination,
}

impl ListQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let page = parse_number(params, "page")?;
        let limit = parse_number(params, "limit")?;
        Ok(ListQuery {
            filter: CustomerFilter {
                search: non_blank(params, "search")?,
                city: non_blank(params, "city")?,
            },
            pagination: Pagination::new(page, limit),
        })
    }
}

fn non_blank(params: &HashMap<String, String>, key: &str) -> Result<Option<String>, AppError> {
    match params.get(key).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(s) if s.contains('\0') => Err(AppError::BadRequest(format!(
            "{} must not contain NUL characters",
            key
        ))),
        Some(s) => Ok(Some(s.to_string())),
    }
}

fn parse_number(params: &HashMap<String, String>, key: &str) -> Result<Option<i64>, AppError> {
    match params.get(key).map(|s| s.trim()) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{} must be an integer", key))),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        ListQuery::from_params(&params)
    }
}
