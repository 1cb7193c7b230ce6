//! 咖啡馆处理器

use axum::{
    extract::{Path, State},
    response::{Html, Json},
};
use serde_json::{json, Value};

use super::{
    model::{AddCafeForm, CafeEnvelope, CafesEnvelope, DeleteQuery, SearchQuery, UpdatePriceQuery},
    service::{CafeError, CafeService},
};
use crate::core::{
    error::CoreError,
    extract::{FirstForm, FirstQuery},
    response::{ApiResponse, Success},
};

#[derive(Clone)]
pub struct AppState {
    pub cafe_service: CafeService,
}

// AUTOINCREMENT 的 id 从 1 开始，非数字 id 按 0 查找，结果总是不存在。
// "+1" 这类带符号的写法会被解析成 1，仍然命中同一条记录。
fn parse_id(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

pub async fn home() -> Html<&'static str> {
    Html(include_str!("../../../public/index.html"))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, CoreError> {
    state.cafe_service.ping().await?;

    Ok(Json(json!({
        "status": "healthy",
        "database": "connected"
    })))
}

pub async fn get_random_cafe(
    State(state): State<AppState>,
) -> Result<Json<CafeEnvelope>, CoreError> {
    let cafe = state.cafe_service.random_cafe().await?;
    Ok(Json(CafeEnvelope { cafe }))
}

pub async fn list_cafes(State(state): State<AppState>) -> Result<Json<CafesEnvelope>, CoreError> {
    let cafes = state.cafe_service.list_cafes().await?;
    Ok(Json(CafesEnvelope { cafes }))
}

pub async fn search_cafes(
    State(state): State<AppState>,
    FirstQuery(query): FirstQuery<SearchQuery>,
) -> Result<Json<CafesEnvelope>, CoreError> {
    let cafes = state
        .cafe_service
        .search_by_location(query.loc.as_deref())
        .await?;
    Ok(Json(CafesEnvelope { cafes }))
}

pub async fn add_cafe(
    State(state): State<AppState>,
    FirstForm(form): FirstForm<AddCafeForm>,
) -> Result<Json<ApiResponse<Success>>, CoreError> {
    state.cafe_service.add_cafe(form.into()).await?;
    Ok(Json(ApiResponse::success("successfully added new cafes")))
}

pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FirstQuery(query): FirstQuery<UpdatePriceQuery>,
) -> Result<Json<Success>, CoreError> {
    state
        .cafe_service
        .update_price(parse_id(&id), query.new_price.as_deref())
        .await?;
    Ok(Json(Success::new("Successfully updated the price")))
}

pub async fn report_closed(
    State(state): State<AppState>,
    Path(id): Path<String>,
    FirstQuery(query): FirstQuery<DeleteQuery>,
) -> Result<Json<Success>, CoreError> {
    state
        .cafe_service
        .delete_cafe(parse_id(&id), query.api_key.as_deref())
        .await
        .map_err(|e| match e {
            CafeError::CafeNotFound(_) => CoreError::not_found(
                "Not Found",
                "Sorry. A cafe with that ID is not found in the database",
            ),
            other => other.into(),
        })?;

    Ok(Json(Success::new("Cafe is deleted")))
}
