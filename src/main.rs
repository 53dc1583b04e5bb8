use academy_client::{
    AppState,
    config::{AppConfig, Env},
    identity::{HttpIdentityClient, IdentityState},
    scope::{HttpSharedDataLoader, SharedDataState},
    token_store::{FileTokenStore, TokenStoreState},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The shell entry point: initializes configuration and logging, assembles
/// the client state against the real platform services, restores any
/// persisted session, and then evaluates each route id passed on the
/// command line, printing the resulting navigation plan as JSON. This is
/// the minimal embedding of the library's external interface — a full UI
/// shell performs the same sequence per navigation.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // Prioritizes RUST_LOG, falling back to sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "academy_client=debug".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON format output for ingestion by log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Client starting in {:?} mode", config.env);

    // 4. Service Assembly
    // Real implementations behind the same trait seams the tests mock.
    let identity = Arc::new(HttpIdentityClient::new(&config.api_base_url)) as IdentityState;
    let tokens = Arc::new(FileTokenStore::new(config.token_path.clone())) as TokenStoreState;
    let shared = Arc::new(HttpSharedDataLoader::new(&config.api_base_url)) as SharedDataState;

    let state = AppState::new(config, identity, tokens, shared);

    // 5. Session Restore (once per startup)
    // Resolves to a terminal loading=false state whether or not a persisted
    // token existed or was still valid.
    state.session.restore().await;

    match state.session.current() {
        Some(user) => tracing::info!(user_id = %user.id, role = ?user.role, "session active"),
        None => tracing::info!("no active session"),
    }

    // 6. Navigation Evaluation
    // Each CLI argument is treated as a requested route; the plan the shell
    // would enact (render / redirect / deny, plus data scoping) is printed.
    for route in std::env::args().skip(1) {
        let plan = state.scope.prepare(&route).await;
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{route}\n{json}"),
            Err(e) => tracing::error!("failed to serialize plan for {route}: {e}"),
        }
    }
}
