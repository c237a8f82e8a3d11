use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;

use hyking::services::seed_service::{self, SeedFile};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let Ok(db_url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL must be set in .env");
        std::process::exit(1);
    };
    let seed_path = env::args()
        .nth(1)
        .or_else(|| env::var("SEED_FILE").ok())
        .unwrap_or_else(|| "seed.json".to_string());

    let raw = match std::fs::read_to_string(&seed_path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("could not read {}: {}", seed_path, e);
            std::process::exit(1);
        }
    };
    let seed: SeedFile = match serde_json::from_str(&raw) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("{} is not a valid seed file: {}", seed_path, e);
            std::process::exit(1);
        }
    };

    let pool = match SqlitePoolOptions::new().connect(&db_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("could not connect to {}: {}", db_url, e);
            std::process::exit(1);
        }
    };

    match seed_service::apply_seed(&pool, &seed).await {
        Ok(report) => {
            println!(
                "seed: profiles={}, activities={}, group_matches={}, current_user_set={}",
                report.profiles, report.activities, report.group_matches, report.current_user_set
            );
        }
        Err(e) => {
            eprintln!("seed failed: {}", e);
            std::process::exit(1);
        }
    }
}
