use std::net::SocketAddr;

use rango::{build_router, db, AppState, Config};
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuración inválida: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::init_db(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("No se pudo abrir la base de datos {}: {}", config.database_url, e);
            std::process::exit(1);
        }
    };
    tracing::info!("✅ Base de datos lista ({})", config.database_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(AppState::new(pool, config));

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Fallo al enlazar el puerto {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    tracing::info!("🚀 Rango corriendo en http://{}", addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("El servidor terminó con error: {}", e);
    }

    tracing::info!("Servidor detenido");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C recibido, apagando"),
        _ = terminate => tracing::info!("SIGTERM recibido, apagando"),
    }
}
