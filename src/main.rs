// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use darnest::config::Config;
use darnest::models::user::{Role, User};
use darnest::routes;
use darnest::state::AppState;
use darnest::store::{DynStore, JsonStore, next_id};
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Initialize the collection store
    std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");
    let store: DynStore = Arc::new(JsonStore::new(&config.data_dir));
    tracing::info!("Collection store at '{}'", config.data_dir);

    // Seed Admin User
    if let Err(e) = seed_admin_user(&store, &config).await {
        tracing::error!("Failed to seed admin user: {:?}", e);
    }

    // Create AppState
    let state = AppState {
        store,
        config: config.clone(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("darnest listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn seed_admin_user(store: &DynStore, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let mut users = store.load_users().await?;

        if !users.iter().any(|u| &u.email == email) {
            tracing::info!("Seeding admin user: {}", email);

            users.push(User {
                id: next_id(&users),
                first_name: "Site".to_string(),
                last_name: "Admin".to_string(),
                email: email.clone(),
                password: password.clone(),
                phone: String::new(),
                address: String::new(),
                role: Role::Admin,
                status: None,
            });
            store.save_users(&users).await?;
            tracing::info!("Admin user created successfully.");
        }
    }
    Ok(())
}
