//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Reparte las conexiones entre un pool fijo de workers
//! 3. Lee y parsea un request por conexión
//! 4. Genera y envía la response, y cierra la conexión

pub mod connection;
pub mod pool;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use connection::ConnectionHandler;
pub use pool::WorkerPool;
pub use tcp::Server;
