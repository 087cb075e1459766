//! authgate application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Create the user store and the shared session store
//! 3. Seed the admin account, if configured
//! 4. Build the router behind the authentication gate
//! 5. Start Axum server
//!
//! Also supports a `hashpw` subcommand that prints an Argon2 hash.

use authgate::{
    auth::{middleware::AppState, password},
    config::Config,
    routes,
    storage::{self, InMemoryUserStore, SessionStore},
};
use std::sync::Arc;

fn print_hashpw_usage() {
    eprintln!("Usage: authgate hashpw <password>");
    eprintln!();
    eprintln!("Print an Argon2id hash of <password>.");
}

#[tokio::main]
async fn main() {
    // Check for hashpw subcommand
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && args[1] == "hashpw" {
        if args.len() != 3 {
            print_hashpw_usage();
            std::process::exit(1);
        }

        match password::hash_password(&args[2]) {
            Ok(hash) => println!("{}", hash),
            Err(e) => {
                eprintln!("Error hashing password: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load config from environment
    let config = Config::from_env().expect("Failed to load config");
    tracing::info!(
        "Starting authgate on {} with {} authentication",
        config.bind_addr,
        config.auth_type
    );
    if config.auth_type == authgate::config::AuthType::Session && config.session_name.is_none() {
        tracing::warn!("AUTH_TYPE is session_auth but SESSION_NAME is unset; every session lookup will fail");
    }

    let users = Arc::new(InMemoryUserStore::new());
    let sessions = SessionStore::new();

    if let (Some(email), Some(pw)) = (&config.admin_email, &config.admin_password) {
        storage::user::upsert_user(&users, email, pw).expect("Failed to seed admin user");
        tracing::info!("Admin user '{}' configured", email);
    }
    if users.is_empty() {
        tracing::info!("No users seeded; register through POST /api/v1/users");
    } else {
        tracing::info!(users = users.len(), "User store ready");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config, users, sessions);
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
