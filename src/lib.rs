//! # File & Echo HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero sobre `std::net`, pensado
//! para un harness de pruebas local. Expone un conjunto fijo de rutas:
//!
//! | Ruta                 | Respuesta                                     |
//! |----------------------|-----------------------------------------------|
//! | `/`                  | 200 sin body                                  |
//! | `/echo/{texto}`      | 200 `text/plain` con `{texto}`                |
//! | `/user-agent`        | 200 `text/plain` con el header `User-Agent`   |
//! | `GET /files/{name}`  | 200 `application/octet-stream` o 404          |
//! | `POST /files/{name}` | 201, escribe el body en el directorio         |
//! | cualquier otra       | 404                                           |
//!
//! ## Arquitectura
//!
//! - `http`: Parsing de requests y construcción de responses
//! - `router`: Tabla ordenada de rutas (primera coincidencia gana)
//! - `handlers`: Un handler por ruta
//! - `server`: Listener TCP, pool de workers y ciclo de vida de la conexión
//! - `metrics`: Contadores y latencias
//! - `config`: Argumentos CLI
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_echo_server::config::Config;
//! use file_echo_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al abrir el socket");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;

pub use error::ServerError;
