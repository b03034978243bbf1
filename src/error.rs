//! # Errores del servidor
//! src/error.rs
//!
//! Errores de arranque (configuración, bind, spawn de workers) y de I/O por
//! conexión. Los errores de parsing viven en `http::ParseError`.

use std::io;
use thiserror::Error;

/// Errores que puede producir el servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// Valores inválidos en la configuración
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No se pudo abrir el socket de escucha
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// No se pudo crear el thread de un worker
    #[error("Failed to spawn worker {id}: {source}")]
    Spawn {
        id: usize,
        #[source]
        source: io::Error,
    },

    /// Falla de I/O en una conexión (reset, timeout, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
