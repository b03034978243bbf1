//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Parser HTTP/1.1 mínimo escrito desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notas.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! User-Agent: curl/8.4.0\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hola!
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /path PROTOCOL`, separados por un solo espacio
//! 2. **Headers**: Pares `Name: Value` (uno por línea, sensibles a mayúsculas)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Presente solo si `Content-Length` > 0
//!
//! El buffer viene de una única lectura del socket: si el cliente envía el
//! body en varios paquetes, el body puede quedar truncado.

use std::collections::HashMap;
use thiserror::Error;

/// Separador entre la cabecera y el body
const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Métodos HTTP
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    /// Cualquier otro token (PATCH, OPTIONS, extensiones...)
    Other(String),
}

impl Method {
    /// Convierte el token de la request line en un método.
    ///
    /// Nunca falla: los tokens desconocidos quedan en `Method::Other` y es el
    /// router el que decide qué hacer con ellos.
    fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::Other(token) => token,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Representa un request HTTP/1.1 parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Path de la petición, siempre empieza con `/` (ej: "/echo/abc")
    path: String,

    /// Protocolo tal como llegó (ej: "HTTP/1.1")
    protocol: String,

    /// Headers HTTP; si un nombre se repite gana la última aparición
    headers: HashMap<String, String>,

    /// Body, solo si `Content-Length` > 0
    body: Option<Vec<u8>>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío (el cliente no envió nada útil)
    #[error("Empty request")]
    EmptyRequest,

    /// La cabecera no es UTF-8 válido
    #[error("Request head is not valid UTF-8")]
    InvalidEncoding,

    /// La request line no tiene exactamente 3 tokens no vacíos
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Línea de header sin ':'
    #[error("Malformed header line: {0:?}")]
    MalformedHeader(String),

    /// `Content-Length` no es un entero
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
}

impl Request {
    /// Parsea un request HTTP/1.1 desde bytes
    ///
    /// # Retorna
    ///
    /// * `Ok(Request)` - Request parseado exitosamente
    /// * `Err(ParseError)` - El request no se puede interpretar; nunca se
    ///   devuelve un Request parcial
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_echo_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: foo\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.user_agent(), Some("foo"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        // 1. Separar cabecera y región del body
        let (head, body_region) = match find_subslice(buffer, HEAD_TERMINATOR) {
            Some(pos) => (&buffer[..pos], &buffer[pos + HEAD_TERMINATOR.len()..]),
            None => (buffer, &[][..]),
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidEncoding)?;
        if head.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let mut lines = head.split("\r\n");

        // 2. Request line
        let request_line = lines.next().unwrap_or_default();
        let (method, path, protocol) = Self::parse_request_line(request_line)?;

        // 3. Headers
        let headers = Self::parse_headers(lines)?;

        // 4. Body
        let body = Self::parse_body(&headers, body_region)?;

        Ok(Request {
            method,
            path,
            protocol,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1` con un único espacio entre tokens.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        let malformed = || ParseError::MalformedRequestLine(line.to_string());

        // Debe tener exactamente 3 partes: METHOD PATH PROTOCOL
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(malformed());
        }

        if !parts[1].starts_with('/') {
            return Err(malformed());
        }

        Ok((
            Method::from_token(parts[0]),
            parts[1].to_string(),
            parts[2].to_string(),
        ))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato: "Name: Value". El nombre se guarda tal cual
    /// (sin normalizar mayúsculas) y del valor se salta el espacio
    /// convencional después de ':'. Una línea sin ':' invalida todo el request.
    fn parse_headers<'a>(
        lines: impl Iterator<Item = &'a str>,
    ) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            if line.is_empty() {
                continue;
            }

            let colon_pos = line
                .find(':')
                .ok_or_else(|| ParseError::MalformedHeader(line.to_string()))?;

            let name = &line[..colon_pos];
            let value = &line[colon_pos + 1..];
            let value = value.strip_prefix(' ').unwrap_or(value);

            headers.insert(name.to_string(), value.to_string());
        }

        Ok(headers)
    }

    /// Toma del buffer hasta `Content-Length` bytes posteriores a la cabecera
    fn parse_body(
        headers: &HashMap<String, String>,
        body_region: &[u8],
    ) -> Result<Option<Vec<u8>>, ParseError> {
        let length = match headers.get("Content-Length") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidContentLength(raw.clone()))?,
            None => return Ok(None),
        };

        if length == 0 {
            return Ok(None);
        }

        let end = length.min(body_region.len());
        Ok(Some(body_region[..end].to_vec()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el path del request
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene el protocolo (ej: "HTTP/1.1")
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (búsqueda exacta, sensible a mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Valor del header `User-Agent`
    pub fn user_agent(&self) -> Option<&str> {
        self.header("User-Agent")
    }

    /// Valor numérico de `Content-Length`, si existe y es válido
    pub fn content_length(&self) -> Option<usize> {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Posición de la primera aparición de `needle` en `haystack`
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
