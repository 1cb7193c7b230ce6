//! 核心提取器模块
//!
//! 查询串和表单里重复出现的键只取第一个值，
//! 解析失败时返回 JSON 错误信封而不是 axum 默认的纯文本。

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::CoreError;

/// 取首个值的查询参数
#[derive(Debug)]
pub struct FirstQuery<T>(pub T);

/// 取首个值的 urlencoded 表单
#[derive(Debug)]
pub struct FirstForm<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for FirstQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| CoreError::BadRequest(e.body_text()))?;

        first_values(pairs).map(FirstQuery)
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for FirstForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = CoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
            .await
            .map_err(|e| CoreError::BadRequest(e.body_text()))?;

        first_values(pairs).map(FirstForm)
    }
}

fn first_values<T: DeserializeOwned>(pairs: Vec<(String, String)>) -> Result<T, CoreError> {
    let mut fields = Map::new();
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| CoreError::BadRequest(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        loc: Option<String>,
        new_price: Option<String>,
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_value_wins() {
        let params: Params =
            first_values(pairs(&[("loc", "Peckham"), ("loc", "Brixton")])).unwrap();
        assert_eq!(params.loc.as_deref(), Some("Peckham"));
        assert_eq!(params.new_price, None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let params: Params = first_values(pairs(&[("other", "x"), ("new_price", "")])).unwrap();
        assert_eq!(params.loc, None);
        assert_eq!(params.new_price.as_deref(), Some(""));
    }
}
