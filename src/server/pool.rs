//! # Pool de Workers
//! src/server/pool.rs
//!
//! Un número fijo de threads, todos haciendo `accept` sobre el mismo listener.
//! La cola de `accept` del sistema operativo reparte las conexiones, así que
//! no hace falta una cola propia: el tamaño del pool es el máximo de
//! conexiones atendidas a la vez.
//!
//! Cada worker repite para siempre: accept → handle → close. Un error o un
//! pánico en una conexión se registra y el worker sigue con la siguiente.

use super::connection::ConnectionHandler;
use crate::error::ServerError;
use std::net::TcpListener;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Espera tras un error de `accept` (ej: EMFILE) antes de reintentar
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);

/// Un worker del pool
struct Worker {
    id: usize,
    handle: JoinHandle<()>,
}

/// Pool de tamaño fijo
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Lanza `size` workers sobre el listener compartido
    pub fn spawn(
        size: usize,
        listener: Arc<TcpListener>,
        handler: ConnectionHandler,
    ) -> Result<Self, ServerError> {
        if size == 0 {
            return Err(ServerError::InvalidConfig("Workers must be >= 1".to_string()));
        }

        let mut workers = Vec::with_capacity(size);

        for id in 0..size {
            let listener = Arc::clone(&listener);
            let handler = handler.clone();

            let handle = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || worker_loop(id, &listener, &handler))
                .map_err(|source| ServerError::Spawn { id, source })?;

            workers.push(Worker { id, handle });
        }

        tracing::info!(workers = size, "pool de workers iniciado");

        Ok(Self { workers })
    }

    /// Número de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Bloquea hasta que todos los workers terminen (en la práctica, nunca)
    pub fn join(self) {
        for worker in self.workers {
            if worker.handle.join().is_err() {
                tracing::error!(worker = worker.id, "worker terminó con pánico");
            }
        }
    }
}

/// Loop de un worker
fn worker_loop(id: usize, listener: &TcpListener, handler: &ConnectionHandler) {
    loop {
        let (stream, peer) = match listener.accept() {
            Ok(conn) => conn,
            Err(e) => {
                tracing::warn!(worker = id, error = %e, "error al aceptar conexión");
                thread::sleep(ACCEPT_BACKOFF);
                continue;
            }
        };

        tracing::debug!(worker = id, %peer, "nueva conexión");

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(stream, peer))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(worker = id, %peer, error = %e, "error en conexión"),
            Err(_) => tracing::error!(worker = id, %peer, "pánico atendiendo conexión"),
        }
    }
}
