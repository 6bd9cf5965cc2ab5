//! Seed administrative accounts: one admin and one manager bound to a store.
//!
//! Usage:
//!   cargo run --bin create_staff -- [--env dev] [--store 1]
//!
//! Passwords are read from STOREGATE_ADMIN_PASSWORD / STOREGATE_MANAGER_PASSWORD,
//! so nothing secret lands in shell history or this file.

use anyhow::{Context, Result, bail};
use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::Row;

fn arg_value(name: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Hashing failed: {}", e))?;
    Ok(hash.to_string())
}

async fn create_user(
    pool: &sqlx::PgPool,
    role: &str,
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
) -> Result<i64> {
    let password_hash = hash_password(password)?;

    let row = sqlx::query(
        r#"INSERT INTO users (role_id, email, password_hash, first_name, last_name)
           SELECT id, $1, $2, $3, $4 FROM roles WHERE name = $5
           ON CONFLICT (email) DO NOTHING
           RETURNING id"#,
    )
    .bind(email)
    .bind(&password_hash)
    .bind(first_name)
    .bind(last_name)
    .bind(role)
    .fetch_optional(pool)
    .await
    .context("Failed to insert user")?;

    match row {
        Some(row) => Ok(row.get("id")),
        None => bail!("User {} already exists", email),
    }
}

fn main() -> Result<()> {
    let env = arg_value("--env").unwrap_or_else(|| "dev".to_string());
    let store_id: i64 = arg_value("--store")
        .unwrap_or_else(|| "1".to_string())
        .parse()
        .context("--store must be an integer")?;

    let admin_password = std::env::var("STOREGATE_ADMIN_PASSWORD")
        .context("STOREGATE_ADMIN_PASSWORD must be set")?;
    let manager_password = std::env::var("STOREGATE_MANAGER_PASSWORD")
        .context("STOREGATE_MANAGER_PASSWORD must be set")?;

    let config = storegate::config::AppConfig::load(&env);

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    rt.block_on(async {
        let db = storegate::Database::connect(&config.postgres_url)
            .await
            .context("PostgreSQL connection failed")?;
        let pool = db.pool();

        let admin_id = create_user(
            pool,
            "admin",
            "admin@shop.test",
            &admin_password,
            "Head",
            "Administrator",
        )
        .await?;
        println!("Created admin (id {}, email admin@shop.test)", admin_id);

        let manager_id = create_user(
            pool,
            "manager",
            "manager@shop.test",
            &manager_password,
            "Store",
            "Manager",
        )
        .await?;

        // Bind the manager to a store so their token carries the affinity
        sqlx::query(
            r#"INSERT INTO employees (user_id, store_id, position)
               VALUES ($1, $2, 'manager')
               ON CONFLICT (user_id, store_id) DO NOTHING"#,
        )
        .bind(manager_id)
        .bind(store_id)
        .execute(pool)
        .await
        .context("Failed to bind manager to store")?;
        println!(
            "Created manager (id {}, email manager@shop.test) bound to store {}",
            manager_id, store_id
        );

        Ok(())
    })
}
