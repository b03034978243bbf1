//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (método, path) a un handler usando una tabla ordenada.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! La tabla se recorre en orden y gana la primera ruta cuyo path y método
//! coinciden. Si ninguna coincide:
//! - si alguna ruta aceptaba el path pero con otro método → 405
//! - si no → handler por defecto (404)
//!
//! La tabla se construye una vez al arrancar y no se modifica después.

use crate::handlers::{self, HandlerContext};
use crate::http::{Method, Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el Request y el contexto compartido y retorna una Response
pub type Handler = fn(&Request, &HandlerContext) -> Response;

/// Cómo se compara el path de una ruta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    /// El path debe ser exactamente igual
    Exact(String),
    /// El path debe empezar con el prefijo
    Prefix(String),
}

impl PathMatch {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Exact(p) => path == p,
            PathMatch::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// Una entrada de la tabla de rutas
struct Route {
    path: PathMatch,
    /// `None` acepta cualquier método
    method: Option<Method>,
    handler: Handler,
}

/// Router que mapea paths a handlers
pub struct Router {
    /// Rutas en orden de precedencia
    routes: Vec<Route>,

    /// Handler cuando ninguna ruta coincide
    fallback: Handler,
}

impl Router {
    /// Crea un router vacío cuyo fallback es 404
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            fallback: handlers::not_found_handler,
        }
    }

    /// Tabla de rutas del servidor, en orden de precedencia:
    ///
    /// 1. `/echo/*` → echo
    /// 2. `/user-agent*` → user-agent
    /// 3. `GET /files/*` → lectura, `POST /files/*` → escritura
    /// 4. `/` exacto → 200
    /// 5. cualquier otra cosa → 404
    pub fn with_default_routes() -> Self {
        let mut router = Self::new();

        router.register(PathMatch::Prefix(handlers::ECHO_PREFIX.into()), None, handlers::echo_handler);
        router.register(PathMatch::Prefix("/user-agent".into()), None, handlers::user_agent_handler);
        router.register(
            PathMatch::Prefix(handlers::FILES_PREFIX.into()),
            Some(Method::GET),
            handlers::file_get_handler,
        );
        router.register(
            PathMatch::Prefix(handlers::FILES_PREFIX.into()),
            Some(Method::POST),
            handlers::file_post_handler,
        );
        router.register(PathMatch::Exact("/".into()), None, handlers::root_handler);

        router
    }

    /// Registra una ruta al final de la tabla (menor precedencia)
    ///
    /// # Ejemplo
    /// ```
    /// use file_echo_server::handlers::HandlerContext;
    /// use file_echo_server::http::{Method, Request, Response};
    /// use file_echo_server::router::{PathMatch, Router};
    ///
    /// fn hello_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
    ///     Response::text("Hello")
    /// }
    ///
    /// let mut router = Router::new();
    /// router.register(PathMatch::Exact("/hello".into()), Some(Method::GET), hello_handler);
    /// ```
    pub fn register(&mut self, path: PathMatch, method: Option<Method>, handler: Handler) {
        self.routes.push(Route { path, method, handler });
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request, ctx: &HandlerContext) -> Response {
        let mut allowed: Vec<&str> = Vec::new();

        for route in &self.routes {
            if !route.path.matches(request.path()) {
                continue;
            }

            match &route.method {
                Some(method) if method != request.method() => allowed.push(method.as_str()),
                _ => return (route.handler)(request, ctx),
            }
        }

        if !allowed.is_empty() {
            return Response::new(StatusCode::MethodNotAllowed)
                .with_header("Allow", &allowed.join(", "));
        }

        (self.fallback)(request, ctx)
    }

    /// Número de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::with_default_routes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn marker_handler(_req: &Request, _ctx: &HandlerContext) -> Response {
        Response::text("marker")
    }

    fn route_raw(router: &Router, raw: &str) -> Response {
        let request = Request::parse(raw.as_bytes()).unwrap();
        router.route(&request, &HandlerContext::default())
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert!(router.is_empty());
        assert_eq!(Router::with_default_routes().len(), 5);
    }

    #[test]
    fn test_empty_router_falls_back_to_404() {
        let response = route_raw(&Router::new(), "GET / HTTP/1.1\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_first_match_wins() {
        let mut router = Router::new();
        router.register(PathMatch::Prefix("/a".into()), None, marker_handler);
        router.register(PathMatch::Exact("/ab".into()), None, handlers::not_found_handler);

        let response = route_raw(&router, "GET /ab HTTP/1.1\r\n\r\n");
        assert_eq!(response.body(), b"marker");
    }

    #[rstest]
    #[case("GET / HTTP/1.1\r\n\r\n", StatusCode::Ok)]
    #[case("GET /echo/abc HTTP/1.1\r\n\r\n", StatusCode::Ok)]
    #[case("POST /echo/abc HTTP/1.1\r\n\r\n", StatusCode::Ok)]
    #[case("GET /user-agent HTTP/1.1\r\nUser-Agent: x\r\n\r\n", StatusCode::Ok)]
    #[case("GET /user-agent HTTP/1.1\r\n\r\n", StatusCode::BadRequest)]
    #[case("GET /files/foo HTTP/1.1\r\n\r\n", StatusCode::NotFound)]
    #[case("POST /files/foo HTTP/1.1\r\n\r\n", StatusCode::NotFound)]
    #[case("PUT /files/foo HTTP/1.1\r\n\r\n", StatusCode::MethodNotAllowed)]
    #[case("GET /echo HTTP/1.1\r\n\r\n", StatusCode::NotFound)]
    #[case("GET /files HTTP/1.1\r\n\r\n", StatusCode::NotFound)]
    #[case("GET /anything-else HTTP/1.1\r\n\r\n", StatusCode::NotFound)]
    fn test_default_table(#[case] raw: &str, #[case] expected: StatusCode) {
        let response = route_raw(&Router::with_default_routes(), raw);
        assert_eq!(response.status(), expected);
    }

    #[test]
    fn test_echo_takes_precedence_over_root() {
        let response = route_raw(&Router::with_default_routes(), "GET /echo/hey HTTP/1.1\r\n\r\n");
        assert_eq!(response.body(), b"hey");
    }

    #[test]
    fn test_user_agent_prefix_matches_longer_paths() {
        let response = route_raw(
            &Router::with_default_routes(),
            "GET /user-agent/extra HTTP/1.1\r\nUser-Agent: curl\r\n\r\n",
        );
        assert_eq!(response.body(), b"curl");
    }

    #[test]
    fn test_method_not_allowed_lists_allowed_methods() {
        let response = route_raw(&Router::with_default_routes(), "DELETE /files/foo HTTP/1.1\r\n\r\n");

        assert_eq!(response.status(), StatusCode::MethodNotAllowed);
        assert_eq!(response.header("Allow"), Some("GET, POST"));
    }
}
