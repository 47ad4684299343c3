use std::path::PathBuf;

use database::{csv_script, DatabaseConnectionInfo, PgDatabase};
use web::{start_web_server, WebState};
use wifi_points::client::Client;

const DEFAULT_SEED_SCRIPT: &str = "./resources/data/access_points.sql";

#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let database_connection_info =
        DatabaseConnectionInfo::from_env().expect("expected database connection info in env.");
    let database = PgDatabase::connect(database_connection_info)
        .await
        .expect("could not connect to database.");

    // seed data
    let script_path = std::env::var("SEED_SCRIPT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SEED_SCRIPT));
    let csv_path = script_path.with_extension("csv");
    if let Err(why) = csv_script::ensure_seed_script(&script_path, &csv_path) {
        log::warn!("could not generate seed script: {}", why);
    }
    if let Err(why) = database.run_seed_script(&script_path).await {
        log::warn!("could not execute seed script: {}", why);
    }

    // web server
    let web_future = start_web_server(WebState {
        wifi_client: Client::new(database),
    });

    let _ = web_future.await;
}
