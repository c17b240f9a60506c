//! Application entry point and server initialization

use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use torabasa::database::{init_db, AppState, ChatKeys};
use torabasa::route::create_app;

/// Application entry point
///
/// Loads the environment, initializes the embedded database and the shared
/// HTTP client, then serves the API until a shutdown signal arrives.
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 5000)
/// - `DATABASE_URL` - Path to database file (default: "torabasa.db")
/// - `DEEPSEEK_API_KEY` / `GEMINI_API_KEY` / `OPENROUTER_API_KEY` - optional
///   provider keys; a missing key degrades that chat endpoint only
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("torabasa=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let port: u16 = port_str.parse().unwrap_or(5000);

    let db_name = env::var("DATABASE_URL").unwrap_or_else(|_| "torabasa.db".to_string());

    let db = init_db(&db_name).expect("Failed to initialize database");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client");

    let state = AppState {
        db: Arc::new(db),
        http,
        chat: ChatKeys::from_env(),
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🚀 Server running at http://localhost:{}", port);
    println!("📂 Using database: {}", db_name);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Resolves when SIGINT (Ctrl+C) or SIGTERM is received, letting the server
/// finish open connections before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
