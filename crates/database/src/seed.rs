use std::{error::Error, path::Path};

use sqlx::PgPool;

/// Executes the access point seed script against the pool.
///
/// Startup must stay idempotent: a table that already holds rows skips the
/// script, and a missing script file is logged and tolerated. Other failures
/// propagate to the caller.
pub async fn run_script(pool: &PgPool, path: &Path) -> Result<(), Box<dyn Error>> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_points;")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        log::info!(
            "{} access points already registered, skipping seed script.",
            existing
        );
        return Ok(());
    }

    if !path.is_file() {
        log::warn!(
            "seed script {} not found, skipping execution.",
            path.display()
        );
        return Ok(());
    }

    let script = tokio::fs::read_to_string(path).await?;
    for statement in split_statements(&script) {
        sqlx::query(&statement).execute(pool).await?;
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM access_points;")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        log::info!("seed script executed, {} access points registered.", count);
    } else {
        log::warn!("seed script executed, but no access points were registered.");
    }
    Ok(())
}

/// Splits an SQL script into single executable statements. A semicolon ends a
/// statement only outside single-quoted literals, and `--` line comments are
/// stripped.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut in_literal = false;
    let mut chars = script.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                current.push(c);
            }
            '-' if !in_literal && chars.peek() == Some(&'-') => {
                for rest in chars.by_ref() {
                    if rest == '\n' {
                        break;
                    }
                }
                current.push('\n');
            }
            ';' if !in_literal => {
                let statement = current.trim();
                if !statement.is_empty() {
                    statements.push(statement.to_owned());
                }
                current.clear();
            }
            _ => current.push(c),
        }
    }
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_owned());
    }
    statements
}
