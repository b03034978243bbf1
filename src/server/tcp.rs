//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Abre el socket de escucha y arranca el pool de workers que atienden las
//! conexiones. El listener de `std` activa `SO_REUSEADDR` en plataformas
//! Unix, así que el servidor se puede reiniciar sobre el mismo puerto sin
//! esperar a que expire `TIME_WAIT`.

use super::connection::ConnectionHandler;
use super::pool::WorkerPool;
use crate::config::Config;
use crate::error::ServerError;
use crate::handlers::HandlerContext;
use crate::metrics::MetricsCollector;
use crate::router::Router;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

/// Servidor HTTP/1.1 con pool de workers
pub struct Server {
    config: Config,
    router: Arc<Router>,
    context: Arc<HandlerContext>,
    metrics: MetricsCollector,
    listener: Arc<TcpListener>,
}

impl Server {
    /// Valida la configuración y abre el socket de escucha
    pub fn bind(config: Config) -> Result<Self, ServerError> {
        config.validate().map_err(ServerError::InvalidConfig)?;

        let address = config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

        tracing::info!(address = %listener.local_addr()?, "servidor escuchando");

        Ok(Self {
            context: Arc::new(HandlerContext::new(config.directory.clone())),
            config,
            router: Arc::new(Router::with_default_routes()),
            metrics: MetricsCollector::new(),
            listener: Arc::new(listener),
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Métricas compartidas por los workers
    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Lanza los workers y retorna sin bloquear
    pub fn start(&self) -> Result<WorkerPool, ServerError> {
        let handler = ConnectionHandler::new(
            Arc::clone(&self.router),
            Arc::clone(&self.context),
            self.metrics.clone(),
            self.config.read_buffer_size,
            self.config.read_timeout(),
        );

        WorkerPool::spawn(self.config.workers, Arc::clone(&self.listener), handler)
    }

    /// Lanza los workers y bloquea el thread actual
    pub fn run(&self) -> Result<(), ServerError> {
        let pool = self.start()?;
        pool.join();
        Ok(())
    }
}
