//! # Ciclo de vida de una conexión
//! src/server/connection.rs
//!
//! ```text
//! Accepted → Reading → Parsed | ParseFailed → Dispatched → Responded → Closed
//! ```
//!
//! Cada conexión lleva exactamente un request: se lee una sola vez, se
//! responde y se cierra. Un request malformado recibe 400 en vez de dejar la
//! conexión colgada.

use crate::error::ServerError;
use crate::handlers::HandlerContext;
use crate::http::{Request, Response, StatusCode};
use crate::metrics::MetricsCollector;
use crate::router::Router;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Todo lo que un worker necesita para atender conexiones.
///
/// Es barato de clonar: cada worker recibe su copia y comparte el router, el
/// contexto y las métricas por `Arc`.
#[derive(Clone)]
pub struct ConnectionHandler {
    router: Arc<Router>,
    context: Arc<HandlerContext>,
    metrics: MetricsCollector,
    read_buffer_size: usize,
    read_timeout: Option<Duration>,
}

/// Mantiene el contador de conexiones activas aunque el handler entre en pánico
struct ActiveConnection<'a>(&'a MetricsCollector);

impl<'a> ActiveConnection<'a> {
    fn open(metrics: &'a MetricsCollector) -> Self {
        metrics.connection_opened();
        Self(metrics)
    }
}

impl Drop for ActiveConnection<'_> {
    fn drop(&mut self) {
        self.0.connection_closed();
    }
}

impl ConnectionHandler {
    pub fn new(
        router: Arc<Router>,
        context: Arc<HandlerContext>,
        metrics: MetricsCollector,
        read_buffer_size: usize,
        read_timeout: Option<Duration>,
    ) -> Self {
        Self {
            router,
            context,
            metrics,
            read_buffer_size,
            read_timeout,
        }
    }

    /// Atiende una conexión completa. El socket se cierra al retornar.
    pub fn handle(&self, mut stream: TcpStream, peer: SocketAddr) -> Result<(), ServerError> {
        let start = Instant::now();
        let _active = ActiveConnection::open(&self.metrics);

        stream.set_read_timeout(self.read_timeout)?;

        let mut buffer = vec![0u8; self.read_buffer_size];
        let bytes_read = stream.read(&mut buffer)?;

        if bytes_read == 0 {
            tracing::debug!(%peer, "conexión cerrada sin datos");
            return Ok(());
        }

        let (response, path) = match Request::parse(&buffer[..bytes_read]) {
            Ok(request) => {
                tracing::debug!(
                    %peer,
                    method = %request.method(),
                    path = request.path(),
                    bytes = bytes_read,
                    active = self.metrics.active_connections(),
                    "request recibido"
                );
                let response = self.router.route(&request, &self.context);
                (response, request.path().to_string())
            }
            Err(e) => {
                tracing::warn!(%peer, error = %e, "request malformado");
                (
                    Response::error(StatusCode::BadRequest, &e.to_string()),
                    String::new(),
                )
            }
        };

        stream.write_all(&response.to_bytes())?;
        stream.flush()?;

        let latency = start.elapsed();
        self.metrics.record_request(response.status().as_u16(), latency);

        log_response(peer, &path, response.status(), latency);

        if tracing::enabled!(tracing::Level::TRACE) {
            tracing::trace!(metrics = %self.metrics.snapshot().to_json(), "métricas");
        }

        Ok(())
    }

    /// Métricas compartidas
    pub fn metrics(&self) -> &MetricsCollector {
        &self.metrics
    }
}

/// El nivel del log depende de la clase del código de estado
fn log_response(peer: SocketAddr, path: &str, status: StatusCode, latency: Duration) {
    let latency_ms = latency.as_secs_f64() * 1000.0;
    let code = status.as_u16();

    if status.is_success() {
        tracing::info!(%peer, path, status = code, latency_ms, "respuesta enviada");
    } else if status.is_client_error() {
        tracing::warn!(%peer, path, status = code, latency_ms, "respuesta de error del cliente");
    } else if status.is_server_error() {
        tracing::error!(%peer, path, status = code, latency_ms, "respuesta de error del servidor");
    } else {
        tracing::info!(%peer, path, status = code, latency_ms, "respuesta enviada");
    }
}
