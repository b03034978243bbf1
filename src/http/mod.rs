//! # Módulo HTTP
//!
//! Implementa el subconjunto de HTTP/1.1 que necesita el servidor, sin usar
//! librerías de alto nivel:
//!
//! - Parsing de requests (request line, headers, body por `Content-Length`)
//! - Construcción de responses
//! - Códigos de estado
//!
//! No hay conexiones persistentes, chunked encoding ni header folding: cada
//! conexión lleva exactamente un request y una response.
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
