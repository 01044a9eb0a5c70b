use sqlx::pool::Pool;
use sqlx::postgres::{PgPool, Postgres};

/// Connection to the enrollment store. Built once at startup and handed to
/// the router as shared state; service modules run their own parameterized
/// statements against the pool.
pub struct Store {
    pool: Pool<Postgres>,
}

impl Store {
    pub async fn connect(database_url: &str) -> Store {
        let pool = PgPool::connect(database_url)
            .await
            .expect("Failed to connect to DB");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to migrate DB");

        Store { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

/// Postgres unique violation (error 23505). The unique indexes on phone and
/// email make this the authoritative duplicate signal, regardless of what the
/// pre-insert guard saw.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
