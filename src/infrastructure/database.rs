//! 数据库基础设施

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Error,
};
use std::{str::FromStr, time::Duration};
use tracing::info;

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 连接文件数据库，不存在时自动创建，并确保表结构存在
    pub async fn new(database_url: &str) -> Result<Self, Error> {
        info!("Connecting to database: {}", database_url);

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(8))
            .connect_with(options)
            .await?;

        create_tables(&pool).await?;

        Ok(Self { pool })
    }

    /// 内存数据库，测试使用
    ///
    /// 每个连接都有自己独立的内存库，
    /// 所以连接池只能有一个连接，且不能被回收。
    pub async fn in_memory() -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;

        create_tables(&pool).await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// AUTOINCREMENT 保证删除后 id 不会被复用
async fn create_tables(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cafe (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name VARCHAR(250) NOT NULL UNIQUE,
            map_url VARCHAR(500) NOT NULL,
            img_url VARCHAR(500) NOT NULL,
            location VARCHAR(250) NOT NULL,
            seats VARCHAR(250) NOT NULL,
            has_toilet BOOLEAN NOT NULL,
            has_wifi BOOLEAN NOT NULL,
            has_sockets BOOLEAN NOT NULL,
            can_take_calls BOOLEAN NOT NULL,
            coffee_price VARCHAR(250)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_cafe_location ON cafe(location)")
        .execute(pool)
        .await?;

    Ok(())
}
