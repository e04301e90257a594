use std::net::{AddrParseError, IpAddr, SocketAddr};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use questlog_api::config::ServerConfig;
use questlog_api::router::build_app_router;
use questlog_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "questlog_api=debug,questlog_db=debug,tower_http=debug";

/// Reasons the server can fail to come up or stay up.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid HOST '{host}': {source}")]
    Host {
        host: String,
        source: AddrParseError,
    },
    #[error("database unavailable: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migrations failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run(ServerConfig::from_env()).await {
        tracing::error!(error = %e, "Server terminated");
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(config: ServerConfig) -> Result<(), StartupError> {
    let ip: IpAddr = config.host.parse().map_err(|source| StartupError::Host {
        host: config.host.clone(),
        source,
    })?;
    let addr = SocketAddr::new(ip, config.port);

    let pool = questlog_db::create_pool(&config.database_url).await?;
    questlog_db::health_check(&pool).await?;
    questlog_db::run_migrations(&pool).await?;
    tracing::info!("Database ready, migrations applied");

    let app = build_app_router(AppState::new(pool, config.clone()), &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down cleanly");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining"),
        () = terminate => tracing::info!("SIGTERM received, draining"),
    }
}
