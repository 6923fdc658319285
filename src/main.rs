use anyhow::Result;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dealership_backoffice::config::environment::EnvironmentConfig;
use dealership_backoffice::database::DatabaseConnection;
use dealership_backoffice::utils::errors::set_expose_error_details;
use dealership_backoffice::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging (RUST_LOG, por defecto info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Back-office Concesionaria - API");
    info!("==================================");

    let config = EnvironmentConfig::from_env()?;
    set_expose_error_details(config.expose_error_details());
    info!("⚙️ Entorno: {}", config.environment);
    info!("🕒 Zona horaria del negocio: {}", config.timezone);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;

    let addr = format!("{}:{}", config.host, config.port);
    let server_url = config.server_url();
    let app = create_router(AppState::new(db_connection.pool(), config));

    info!("🌐 Servidor iniciando en http://{}", server_url);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Estado del servicio");
    info!("   POST /login | POST /logout - Sesión");
    info!("📊 /api/estadisticas/* - Dashboard");
    info!("🚗 /api/vehiculos, 👤 /api/clientes, 💰 /api/ventas");
    info!("🧾 /api/gastos-corrientes, /api/gastos-vehiculos, /api/vendedores");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
