//! # Handlers de archivos
//!
//! - `GET /files/{nombre}`: devuelve el contenido como `application/octet-stream`
//! - `POST /files/{nombre}`: escribe el body del request como contenido completo
//!
//! Los archivos se resuelven contra el directorio configurado con
//! `--directory`. Sin directorio, ambas rutas responden 404.
//!
//! No hay locking: dos requests concurrentes sobre el mismo archivo pueden
//! intercalarse (gana la última escritura).

use super::HandlerContext;
use crate::http::{Request, Response, StatusCode};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// Prefijo de las rutas de archivos
pub const FILES_PREFIX: &str = "/files/";

/// Resultado de resolver `/files/{nombre}` contra el directorio
enum Resolved {
    /// Ruta final dentro del directorio
    Path(PathBuf),
    /// Sin directorio configurado o nombre vacío
    NotFound,
    /// El nombre intenta salir del directorio (`..`, rutas absolutas)
    Invalid,
}

/// Resuelve el nombre del archivo del request contra el directorio
fn resolve(req: &Request, ctx: &HandlerContext) -> Resolved {
    let directory = match &ctx.directory {
        Some(dir) => dir,
        None => return Resolved::NotFound,
    };

    let name = req.path().strip_prefix(FILES_PREFIX).unwrap_or_default();
    if name.is_empty() {
        return Resolved::NotFound;
    }

    let stays_inside = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !stays_inside {
        return Resolved::Invalid;
    }

    Resolved::Path(directory.join(name))
}

/// Handler para `GET /files/{nombre}`
///
/// # Responses
/// - 200 con el contenido exacto del archivo
/// - 404 si no hay directorio o el archivo no existe
/// - 400 si el nombre escapa del directorio
/// - 500 si falla la lectura
pub fn file_get_handler(req: &Request, ctx: &HandlerContext) -> Response {
    let path = match resolve(req, ctx) {
        Resolved::Path(path) => path,
        Resolved::NotFound => return Response::new(StatusCode::NotFound),
        Resolved::Invalid => return Response::error(StatusCode::BadRequest, "Invalid filename"),
    };

    if !path.is_file() {
        tracing::debug!(path = %path.display(), "archivo no encontrado");
        return Response::new(StatusCode::NotFound);
    }

    match fs::read(&path) {
        Ok(content) => Response::octet_stream(content),
        // El archivo pudo borrarse entre el chequeo y la lectura
        Err(e) if e.kind() == ErrorKind::NotFound => Response::new(StatusCode::NotFound),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "error leyendo archivo");
            Response::error(StatusCode::InternalServerError, "Failed to read file")
        }
    }
}

/// Handler para `POST /files/{nombre}`
///
/// Crea el archivo o lo sobrescribe completo con el body del request (vacío
/// si no hubo body). No crea subdirectorios.
///
/// # Responses
/// - 201 sin body
/// - 404 si no hay directorio
/// - 400 si el nombre escapa del directorio
/// - 500 si falla la escritura
pub fn file_post_handler(req: &Request, ctx: &HandlerContext) -> Response {
    let path = match resolve(req, ctx) {
        Resolved::Path(path) => path,
        Resolved::NotFound => return Response::new(StatusCode::NotFound),
        Resolved::Invalid => return Response::error(StatusCode::BadRequest, "Invalid filename"),
    };

    let body = req.body().unwrap_or_default();

    match fs::write(&path, body) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = body.len(), "archivo escrito");
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "error escribiendo archivo");
            Response::error(StatusCode::InternalServerError, "Failed to write file")
        }
    }
}
