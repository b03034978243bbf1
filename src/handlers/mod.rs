//! # Handlers
//! src/handlers/mod.rs
//!
//! Cada handler recibe el `Request` ya parseado y el contexto compartido del
//! servidor, y produce exactamente una `Response`:
//!
//! - `basic`: `/`, `/echo/{texto}`, `/user-agent` y el 404 por defecto
//! - `files`: `GET` y `POST` sobre `/files/{nombre}`

pub mod basic;
pub mod files;

use std::path::PathBuf;

// Re-exportar handlers
pub use basic::*;
pub use files::*;

/// Estado de solo lectura compartido por todos los workers
#[derive(Debug, Clone, Default)]
pub struct HandlerContext {
    /// Directorio raíz de `/files/`; `None` deshabilita esas rutas (404)
    pub directory: Option<PathBuf>,
}

impl HandlerContext {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self { directory }
    }
}
