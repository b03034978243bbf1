//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y variables de
//! entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_echo_server --directory /tmp/data --port 4221 --workers 100
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./file_echo_server
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Tamaño mínimo del buffer de lectura
const MIN_READ_BUFFER: usize = 64;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "file_echo_server")]
#[command(about = "Servidor HTTP/1.1 mínimo: echo, user-agent y archivos estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio de `/files/`; sin él esas rutas responden 404
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Número de workers (conexiones atendidas en paralelo)
    #[arg(long, default_value = "100", env = "HTTP_WORKERS")]
    pub workers: usize,

    /// Bytes leídos del socket por request (una sola lectura)
    #[arg(long = "read-buffer", default_value = "4096")]
    pub read_buffer_size: usize,

    /// Timeout de lectura por conexión en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0")]
    pub read_timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_echo_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Timeout de lectura, `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Workers must be >= 1".to_string());
        }

        if self.read_buffer_size < MIN_READ_BUFFER {
            return Err(format!("Read buffer must be >= {} bytes", MIN_READ_BUFFER));
        }

        if let Some(dir) = &self.directory {
            if !dir.is_dir() {
                return Err(format!("Directory does not exist: {}", dir.display()));
            }
        }

        Ok(())
    }

    /// Registra un resumen de la configuración en el log
    pub fn print_summary(&self) {
        tracing::info!(
            address = %self.address(),
            workers = self.workers,
            read_buffer = self.read_buffer_size,
            read_timeout_ms = self.read_timeout_ms,
            "configuración de red"
        );

        match &self.directory {
            Some(dir) => tracing::info!(directory = %dir.display(), "rutas /files/ habilitadas"),
            None => tracing::info!("sin --directory: /files/ responde 404"),
        }
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: 4221,
            host: "127.0.0.1".to_string(),
            directory: None,
            workers: 100,
            read_buffer_size: 4096,
            read_timeout_ms: 0,
        }
    }
}
