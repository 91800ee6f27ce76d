use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite,
};

use crate::error::AppError;

// Alias para "Pool<Sqlite>"
pub type DbPool = Pool<Sqlite>;

pub async fn init_db(db_url: &str) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(db_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Las migraciones van embebidas en el binario
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

// Violación de UNIQUE (nombre de categoría, slug o usuario repetido)
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
