//! 咖啡馆业务服务

use std::sync::Arc;

use sqlx::{error::ErrorKind, SqlitePool};
use thiserror::Error;
use tracing::{info, warn};

use super::model::{Cafe, NewCafe};
use crate::core::{auth::Authorizer, error::CoreError};

const CAFE_COLUMNS: &str = "id, name, map_url, img_url, location, seats, \
     has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price";

#[derive(Error, Debug)]
pub enum CafeError {
    #[error("no cafe at location {0:?}")]
    NoCafeAtLocation(Option<String>),

    #[error("cafe {0} not found")]
    CafeNotFound(i64),

    #[error("a cafe named {0:?} already exists")]
    DuplicateName(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("invalid api key")]
    Unauthorized,

    #[error("no cafes in the database")]
    EmptyCollection,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CafeError> for CoreError {
    fn from(err: CafeError) -> Self {
        match err {
            CafeError::NoCafeAtLocation(_) => {
                CoreError::not_found("NotFound", "We don't have a cafe at that location")
            }
            CafeError::EmptyCollection => {
                CoreError::not_found("NotFound", "We don't have any cafes yet")
            }
            CafeError::CafeNotFound(_) => {
                CoreError::not_found("Not Found", "Sorry a cafe with that id is not found")
            }
            CafeError::DuplicateName(name) => {
                CoreError::Conflict(format!("A cafe named {name} already exists"))
            }
            CafeError::MissingField(field) => {
                CoreError::BadRequest(format!("Missing required field: {field}"))
            }
            CafeError::Unauthorized => CoreError::Unauthorized(
                "Sorry That's not allowed. Make sure you have the correct API".to_string(),
            ),
            CafeError::Database(e) => CoreError::InternalServerError(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct CafeService {
    pool: SqlitePool,
    authorizer: Arc<dyn Authorizer>,
}

impl CafeService {
    pub fn new(pool: SqlitePool, authorizer: Arc<dyn Authorizer>) -> Self {
        Self { pool, authorizer }
    }

    /// 在全部记录中均匀随机选一条
    pub async fn random_cafe(&self) -> Result<Cafe, CafeError> {
        let sql = format!("SELECT {CAFE_COLUMNS} FROM cafe ORDER BY RANDOM() LIMIT 1");

        sqlx::query_as::<_, Cafe>(&sql)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(CafeError::EmptyCollection)
    }

    /// 按 name 升序（区分大小写）
    pub async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeError> {
        let sql = format!("SELECT {CAFE_COLUMNS} FROM cafe ORDER BY name ASC");

        Ok(sqlx::query_as::<_, Cafe>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    /// 精确匹配 location，没有结果时返回错误而不是空列表
    pub async fn search_by_location(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<Cafe>, CafeError> {
        let sql = format!("SELECT {CAFE_COLUMNS} FROM cafe WHERE location = ? ORDER BY id");

        let cafes = sqlx::query_as::<_, Cafe>(&sql)
            .bind(location)
            .fetch_all(&self.pool)
            .await?;

        if cafes.is_empty() {
            return Err(CafeError::NoCafeAtLocation(location.map(str::to_string)));
        }

        Ok(cafes)
    }

    pub async fn add_cafe(&self, cafe: NewCafe) -> Result<(), CafeError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO cafe (name, map_url, img_url, location, seats,
                              has_toilet, has_wifi, has_sockets, can_take_calls, coffee_price)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&cafe.name)
        .bind(&cafe.map_url)
        .bind(&cafe.img_url)
        .bind(&cafe.location)
        .bind(&cafe.seats)
        .bind(cafe.has_toilet)
        .bind(cafe.has_wifi)
        .bind(cafe.has_sockets)
        .bind(cafe.can_take_calls)
        .bind(&cafe.coffee_price)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_insert_error(e, &cafe))?;

        tx.commit().await?;

        info!("Created cafe: {}", cafe.name.as_deref().unwrap_or_default());
        Ok(())
    }

    /// 不校验价格格式，new_price 缺失时写入 NULL
    pub async fn update_price(&self, id: i64, new_price: Option<&str>) -> Result<(), CafeError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE cafe SET coffee_price = ? WHERE id = ?")
            .bind(new_price)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CafeError::CafeNotFound(id));
        }

        tx.commit().await?;

        info!("Updated price of cafe {}: {:?}", id, new_price);
        Ok(())
    }

    /// 先校验 key，未授权时不访问数据库
    pub async fn delete_cafe(&self, id: i64, api_key: Option<&str>) -> Result<(), CafeError> {
        if !self.authorizer.authorize(api_key) {
            warn!("Rejected delete of cafe {}: invalid api key", id);
            return Err(CafeError::Unauthorized);
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM cafe WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CafeError::CafeNotFound(id));
        }

        tx.commit().await?;

        info!("Deleted cafe: {}", id);
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), CafeError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn map_insert_error(err: sqlx::Error, cafe: &NewCafe) -> CafeError {
    let Some(db_err) = err.as_database_error() else {
        return CafeError::Database(err);
    };

    match db_err.kind() {
        ErrorKind::UniqueViolation => {
            CafeError::DuplicateName(cafe.name.clone().unwrap_or_default())
        }
        ErrorKind::NotNullViolation => {
            // SQLite 的消息形如 "NOT NULL constraint failed: cafe.name"
            let field = db_err
                .message()
                .rsplit('.')
                .next()
                .unwrap_or_default()
                .to_string();
            CafeError::MissingField(field)
        }
        _ => CafeError::Database(err),
    }
}
