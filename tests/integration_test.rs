//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero, con un
//! directorio temporal para las rutas `/files/`.

use file_echo_server::config::Config;
use file_echo_server::server::{Server, WorkerPool};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

/// Servidor corriendo en background junto con su directorio
struct TestServer {
    addr: SocketAddr,
    dir: Option<TempDir>,
    _server: Server,
    _pool: WorkerPool,
}

impl TestServer {
    fn start(with_directory: bool) -> Self {
        let dir = with_directory.then(|| TempDir::new().expect("tempdir"));
        let config = Config {
            port: 0,
            workers: 8,
            directory: dir.as_ref().map(|d| d.path().to_path_buf()),
            ..Config::default()
        };

        let server = Server::bind(config).expect("bind");
        let addr = server.local_addr().expect("local_addr");
        let pool = server.start().expect("start");

        Self {
            addr,
            dir,
            _server: server,
            _pool: pool,
        }
    }

    fn dir(&self) -> &std::path::Path {
        self.dir.as_ref().expect("server without directory").path()
    }

    /// Envía bytes crudos y retorna la response completa
    fn send(&self, raw: &[u8]) -> Vec<u8> {
        let mut stream = TcpStream::connect(self.addr).expect("connect");
        stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
        stream.write_all(raw).expect("write");
        stream.flush().unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).expect("read");
        response
    }
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &[u8]) -> &[u8] {
    match response.windows(4).position(|w| w == b"\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => &[],
    }
}

#[test]
fn test_root_endpoint() {
    let server = TestServer::start(false);
    let response = server.send(b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n");

    assert_eq!(response, b"HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_not_found() {
    let server = TestServer::start(false);
    let response = server.send(b"GET /anything-else HTTP/1.1\r\n\r\n");

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_echo_endpoint() {
    let server = TestServer::start(false);

    for text in ["abc", "pineapple", "a/b/c", "with%20space", ""] {
        let raw = format!("GET /echo/{} HTTP/1.1\r\n\r\n", text);
        let response = server.send(raw.as_bytes());
        let expected = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\n\r\n{}",
            text.len(),
            text
        );

        assert_eq!(String::from_utf8(response).unwrap(), expected);
    }
}

#[test]
fn test_user_agent_endpoint() {
    let server = TestServer::start(false);
    let response = server.send(
        b"GET /user-agent HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: foobar/1.2.3\r\n\r\n",
    );

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 12\r\n\r\nfoobar/1.2.3"
    );
}

#[test]
fn test_user_agent_missing_header() {
    let server = TestServer::start(false);
    let response = server.send(b"GET /user-agent HTTP/1.1\r\n\r\n");

    assert!(response.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
}

#[test]
fn test_malformed_request_gets_400() {
    let server = TestServer::start(false);

    let response = server.send(b"GET /only-two-tokens\r\n\r\n");
    assert!(response.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));

    let response = server.send(b"GET / HTTP/1.1\r\nno colon here\r\n\r\n");
    assert!(response.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));

    // El servidor sigue respondiendo después de requests inválidos
    assert_eq!(server.send(b"GET / HTTP/1.1\r\n\r\n"), b"HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_post_then_get_file() {
    let server = TestServer::start(true);
    let body = b"12345 contenido binario \x00\x01\xff";

    let mut raw = format!(
        "POST /files/datos.bin HTTP/1.1\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\n\r\n",
        body.len()
    )
    .into_bytes();
    raw.extend_from_slice(body);

    assert_eq!(server.send(&raw), b"HTTP/1.1 201 Created\r\n\r\n");

    let response = server.send(b"GET /files/datos.bin HTTP/1.1\r\n\r\n");
    let header = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\n\r\n",
        body.len()
    );
    assert!(response.starts_with(header.as_bytes()));
    assert_eq!(extract_body(&response), body);
}

#[test]
fn test_get_existing_file_from_disk() {
    let server = TestServer::start(true);
    std::fs::write(server.dir().join("foo"), b"Hello, World!").unwrap();

    let response = server.send(b"GET /files/foo HTTP/1.1\r\n\r\n");

    assert_eq!(
        response,
        b"HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 13\r\n\r\nHello, World!"
            .to_vec()
    );
}

#[test]
fn test_get_missing_file() {
    let server = TestServer::start(true);
    let response = server.send(b"GET /files/non_existant_file HTTP/1.1\r\n\r\n");

    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_files_without_directory() {
    let server = TestServer::start(false);

    assert_eq!(
        server.send(b"GET /files/foo HTTP/1.1\r\n\r\n"),
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
    assert_eq!(
        server.send(b"POST /files/foo HTTP/1.1\r\nContent-Length: 1\r\n\r\nx"),
        b"HTTP/1.1 404 Not Found\r\n\r\n"
    );
}

#[test]
fn test_files_other_method() {
    let server = TestServer::start(true);
    let response = server.send(b"PUT /files/foo HTTP/1.1\r\n\r\n");

    assert!(response.starts_with(b"HTTP/1.1 405 Method Not Allowed\r\n"));
}

#[test]
fn test_concurrent_posts_to_distinct_files() {
    let server = std::sync::Arc::new(TestServer::start(true));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let server = std::sync::Arc::clone(&server);
            thread::spawn(move || {
                let body = format!("contenido del archivo {}", i).repeat(i + 1);
                let raw = format!(
                    "POST /files/archivo-{} HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
                    i,
                    body.len(),
                    body
                );
                let response = server.send(raw.as_bytes());
                assert_eq!(response, b"HTTP/1.1 201 Created\r\n\r\n");
                body
            })
        })
        .collect();

    let bodies: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for (i, body) in bodies.iter().enumerate() {
        let content = std::fs::read(server.dir().join(format!("archivo-{}", i))).unwrap();
        assert_eq!(content, body.as_bytes());

        let response = server.send(format!("GET /files/archivo-{} HTTP/1.1\r\n\r\n", i).as_bytes());
        assert_eq!(extract_body(&response), body.as_bytes());
    }
}
