use std::{net::SocketAddr, sync::Arc};

use configs::{AppConfig, AuthSettings, TokenIssuerKind};
use service::auth::{
    repo::seaorm::SeaOrmStorage,
    storage::Storage,
    token::{JwtTokenIssuer, PlaceholderTokenIssuer, TokenIssuer},
    AuthService,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::auth::ServerState;
use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn token_issuer(kind: TokenIssuerKind) -> Arc<dyn TokenIssuer> {
    match kind {
        TokenIssuerKind::Jwt => Arc::new(JwtTokenIssuer),
        TokenIssuerKind::Placeholder => {
            warn!("placeholder token issuer configured; issued credentials carry no identity");
            Arc::new(PlaceholderTokenIssuer)
        }
    }
}

/// Composition root: one auth service over one store, owned by the returned state.
pub fn build_state<S: Storage + 'static>(storage: Arc<S>, auth: &AuthSettings) -> ServerState {
    let svc = AuthService::from_storage(storage.clone(), token_issuer(auth.token_issuer), auth.token_ttl());
    ServerState { auth: Arc::new(svc), pinger: storage }
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => { sig.recv().await; }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received, draining connections");
}

/// Public entry: connect the store, build the app and serve until shutdown.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let addr = bind_addr(&cfg)?;

    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    let storage = Arc::new(SeaOrmStorage::new(db, cfg.database.query_timeout()));
    let state = build_state(storage, &cfg.auth);

    let app = routes::build_router(state, build_cors(), cfg.server.request_timeout());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, env = %cfg.env, "sso server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!("sso server stopped");
    Ok(())
}
