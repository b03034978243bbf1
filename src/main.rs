//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Parsea los argumentos CLI, inicializa el logging y arranca el servidor.
//! El nivel de log se controla con `RUST_LOG` (por defecto `info`).

use file_echo_server::config::Config;
use file_echo_server::server::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_thread_names(true))
        .init();

    let config = Config::new();
    config.print_summary();

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "no se pudo iniciar el servidor");
            std::process::exit(1);
        }
    };

    // Bloquea el thread principal mientras los workers atienden conexiones
    if let Err(e) = server.run() {
        tracing::error!(error = %e, "error fatal");
        std::process::exit(1);
    }
}
