//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! Una respuesta sin body no lleva headers: `HTTP/1.1 404 Not Found\r\n\r\n`.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use file_echo_server::http::{Response, StatusCode};
//!
//! let response = Response::text("Hello");
//! assert_eq!(response.status(), StatusCode::Ok);
//!
//! let bytes = response.to_bytes();
//! // Ahora puedes enviar `bytes` por el socket
//! ```

use super::StatusCode;

/// Versión que se escribe en la status line
const PROTOCOL: &str = "HTTP/1.1";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Headers en el orden en que se escriben al socket
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::Created);
    /// assert_eq!(response.to_bytes(), b"HTTP/1.1 201 Created\r\n\r\n");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el cuerpo desde bytes
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        let length = body.len().to_string();
        self.body = body;
        self.add_header("Content-Length", &length);
        self
    }

    /// Respuesta 200 `text/plain` con el body dado
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::Response;
    ///
    /// let bytes = Response::text("abc").to_bytes();
    /// assert_eq!(
    ///     bytes,
    ///     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 3\r\n\r\nabc"
    /// );
    /// ```
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body(body.as_bytes().to_vec())
    }

    /// Respuesta 200 `application/octet-stream` (contenido de archivos)
    pub fn octet_stream(body: Vec<u8>) -> Self {
        Self::new(StatusCode::Ok)
            .with_header("Content-Type", "application/octet-stream")
            .with_body(body)
    }

    /// Respuesta de error con un mensaje en texto plano
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::http::{Response, StatusCode};
    ///
    /// let response = Response::error(StatusCode::BadRequest, "Missing User-Agent header");
    /// assert_eq!(response.status(), StatusCode::BadRequest);
    /// ```
    pub fn error(status: StatusCode, message: &str) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain")
            .with_body(message.as_bytes().to_vec())
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`, en orden de inserción
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        result.extend_from_slice(format!("{} {}\r\n", PROTOCOL, self.status).as_bytes());

        for (name, value) in &self.headers {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Busca un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
