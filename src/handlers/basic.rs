//! # Handlers básicos
//!
//! - `/`: 200 sin body
//! - `/echo/{texto}`: devuelve `{texto}` como `text/plain`
//! - `/user-agent`: devuelve el header `User-Agent` como `text/plain`
//! - cualquier otra ruta: 404 sin body

use super::HandlerContext;
use crate::http::{Request, Response, StatusCode};

/// Prefijo de la ruta echo
pub const ECHO_PREFIX: &str = "/echo/";

/// Handler para `/`
pub fn root_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler por defecto cuando ninguna ruta coincide
pub fn not_found_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
    Response::new(StatusCode::NotFound)
}

/// Handler para `/echo/{texto}`
///
/// El body es el path sin el prefijo `/echo/`, sin decodificar.
///
/// # Ejemplo de response
/// ```text
/// HTTP/1.1 200 OK
/// Content-Type: text/plain
/// Content-Length: 3
///
/// abc
/// ```
pub fn echo_handler(req: &Request, _ctx: &HandlerContext) -> Response {
    let text = req.path().strip_prefix(ECHO_PREFIX).unwrap_or_default();
    Response::text(text)
}

/// Handler para `/user-agent`
///
/// Sin header `User-Agent` responde 400.
pub fn user_agent_handler(req: &Request, _ctx: &HandlerContext) -> Response {
    match req.user_agent() {
        Some(agent) => Response::text(agent),
        None => Response::error(StatusCode::BadRequest, "Missing User-Agent header"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: &str) -> Request {
        Request::parse(raw.as_bytes()).unwrap()
    }

    #[test]
    fn test_root_handler() {
        let response = root_handler(&request("GET / HTTP/1.1\r\n\r\n"), &HandlerContext::default());

        assert_eq!(response.status(), StatusCode::Ok);
        assert!(response.body().is_empty());
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_not_found_handler() {
        let response = not_found_handler(
            &request("GET /nada HTTP/1.1\r\n\r\n"),
            &HandlerContext::default(),
        );

        assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    }

    #[test]
    fn test_echo_handler() {
        let response = echo_handler(
            &request("GET /echo/raspberry HTTP/1.1\r\n\r\n"),
            &HandlerContext::default(),
        );

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("9"));
        assert_eq!(response.body(), b"raspberry");
    }

    #[test]
    fn test_echo_keeps_nested_segments() {
        let response = echo_handler(
            &request("GET /echo/a/b/c HTTP/1.1\r\n\r\n"),
            &HandlerContext::default(),
        );

        assert_eq!(response.body(), b"a/b/c");
    }

    #[test]
    fn test_echo_empty_text() {
        let response = echo_handler(&request("GET /echo/ HTTP/1.1\r\n\r\n"), &HandlerContext::default());

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Length"), Some("0"));
    }

    #[test]
    fn test_user_agent_handler() {
        let response = user_agent_handler(
            &request("GET /user-agent HTTP/1.1\r\nUser-Agent: foobar/1.2.3\r\n\r\n"),
            &HandlerContext::default(),
        );

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"foobar/1.2.3");
    }

    #[test]
    fn test_user_agent_missing_header() {
        let response = user_agent_handler(
            &request("GET /user-agent HTTP/1.1\r\n\r\n"),
            &HandlerContext::default(),
        );

        assert_eq!(response.status(), StatusCode::BadRequest);
    }
}
