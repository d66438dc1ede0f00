#![allow(clippy::unused_async)]
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::{DeleteResult, ProcessedFile, RegistryStats, Session};

use crate::domain::Payload;
use crate::error::Error;
use crate::file_reply::FileReply;
use crate::reducer::{self, SourceFile};
use crate::Database;

/// Reduces several files from a multipart form and stores them in a session.
/// Parts that fail to process are logged and skipped.
#[utoipa::path(
    post,
    path = "/api/{session}",
    responses(
        (status = 201, description = "Files processed and stored", body = [String]),
        (status = 500, description = "Server error", body = String)
    ),
    tag = "sessions",
    params(
        ("session" = String, Path, description = "Session id")
    ),
)]
pub async fn insert_many_from_form(
    Path(session): Path<String>,
    State(db): State<Database>,
    mut multipart: Multipart,
) -> Response {
    tracing::info!("upload into session: {session}");
    let mut inserted: Vec<String> = vec![];
    let mut store = db.lock().await;
    while let Ok(Some(field)) = multipart.next_field().await {
        let file_name = field.file_name().unwrap_or_default().to_string();
        let media_type = field.content_type().unwrap_or_default().to_string();
        let bytes = match field.bytes().await {
            Ok(b) => b,
            Err(e) => {
                tracing::error!("{e}");
                return internal_server_error(&e);
            }
        };
        let read_bytes = bytes.len();
        let source = SourceFile {
            name: file_name.clone(),
            media_type,
            bytes: bytes.to_vec(),
        };
        let insert_result =
            reducer::reduce(&source).and_then(|record| store.add(&session, record));
        match insert_result {
            Ok(id) => {
                tracing::info!("file: {file_name} read: {read_bytes} file id: {id}");
                inserted.push(id);
            }
            Err(e) => {
                tracing::error!("file '{file_name}' not inserted. Error: {e}");
            }
        }
    }

    (StatusCode::CREATED, Json(inserted)).into_response()
}

/// Reduces a single raw-body file and stores it in a session. The request
/// `content-type` header is taken as the file's declared media type.
#[utoipa::path(
    post,
    path = "/api/{session}/{file_name}",
    tag = "files",
    request_body(content = Vec<u8>, content_type = "application/octet-stream"),
    responses(
        (status = 201, description = "File processed and stored", body = String),
        (status = 422, description = "Image could not be decoded", body = String),
        (status = 500, description = "Server error", body = String)
    ),
    params(
        ("session" = String, Path, description = "Session id"),
        ("file_name" = String, Path, description = "Original file name")
    ),
)]
pub async fn insert_file(
    Path((session, file_name)): Path<(String, String)>,
    State(db): State<Database>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let media_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let read_bytes = body.len();
    let source = SourceFile {
        name: file_name.clone(),
        media_type,
        bytes: body.to_vec(),
    };
    match reducer::reduce(&source) {
        Ok(record) => {
            let mut store = db.lock().await;
            match store.add(&session, record) {
                Ok(id) => {
                    tracing::info!("file: {file_name} read: {read_bytes} file id: {id}");
                    (StatusCode::CREATED, Json(id)).into_response()
                }
                Err(e) => {
                    tracing::error!("file '{file_name}' not inserted. Error: {e}");
                    internal_server_error(&e)
                }
            }
        }
        Err(e @ Error::Decode(_)) => {
            tracing::error!("file '{file_name}' not processed. Error: {e}");
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()).into_response()
        }
        Err(e) => {
            tracing::error!("{e}");
            internal_server_error(&e)
        }
    }
}

/// Lists all sessions.
#[utoipa::path(
    get,
    path = "/api/",
    tag = "sessions",
    responses(
        (status = 200, description = "List all sessions successfully", body = [Session]),
    ),
)]
pub async fn get_sessions(State(db): State<Database>) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = store.sessions().unwrap_or_default();
    Json(result)
}

/// Lists all files of a session, newest first.
#[utoipa::path(
    get,
    path = "/api/{session}",
    responses(
        (status = 200, description = "Get all session files successfully", body = [ProcessedFile]),
        (status = 404, description = "Session not found", body = [ProcessedFile])
    ),
    tag = "sessions",
    params(
        ("session" = String, Path, description = "Session id")
    ),
)]
pub async fn get_files(
    Path(session): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = store.list(&session).unwrap_or_default();
    let status = if result.is_empty() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(result))
}

/// Gets aggregate statistics for a session. An empty or unknown session
/// reports zero statistics.
#[utoipa::path(
    get,
    path = "/api/{session}/stats",
    responses(
        (status = 200, description = "Session statistics", body = RegistryStats),
    ),
    tag = "sessions",
    params(
        ("session" = String, Path, description = "Session id")
    ),
)]
pub async fn get_stats(
    Path(session): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = store.stats(&session).unwrap_or_default();
    Json(result)
}

/// Deletes a whole session with all its files.
#[utoipa::path(
    delete,
    path = "/api/{session}",
    responses(
        (status = 200, description = "Session with all files successfully deleted", body = DeleteResult),
        (status = 404, description = "Session not found", body = DeleteResult)
    ),
    tag = "sessions",
    params(
        ("session" = String, Path, description = "Session id")
    ),
)]
pub async fn delete_session(
    Path(session): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = match store.clear(&session) {
        Ok(deleted) => {
            tracing::info!(
                "session: {session} deleted. The number of files removed {}",
                deleted.files
            );
            deleted
        }
        Err(e) => {
            tracing::error!("session '{session}' not deleted. Error: {e}");
            DeleteResult::default()
        }
    };

    let status = if result.files == 0 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(result))
}

/// Downloads a file's content by id: the stored payload decoded back to raw
/// bytes, served under the original file name.
#[utoipa::path(
    get,
    path = "/api/file/{id}",
    responses(
        (status = 200, description = "File binary content", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "File not found", body = String)
    ),
    tag = "files",
    params(
        ("id" = String, Path, description = "File id")
    ),
)]
pub async fn get_file_content(
    Path(id): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = store
        .get(&id)
        .and_then(|record| Payload::from_record(&record));
    match result {
        Ok(payload) => {
            tracing::info!("File size {}", payload.bytes.len());
            FileReply::new(payload).into_response()
        }
        Err(e) => make_error_response(&e),
    }
}

/// Gets a file's record by id.
#[utoipa::path(
    get,
    path = "/api/file/{id}/meta",
    responses(
        (status = 200, body = ProcessedFile),
        (status = 404, description = "File not found", body = String)
    ),
    tag = "files",
    params(
        ("id" = String, Path, description = "File id")
    ),
)]
pub async fn get_file_info(
    Path(id): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    match store.get(&id) {
        Ok(record) => Json(record).into_response(),
        Err(e) => make_error_response(&e),
    }
}

/// Deletes a file by id.
#[utoipa::path(
    delete,
    path = "/api/file/{id}",
    responses(
        (status = 200, description = "File successfully deleted", body = DeleteResult),
        (status = 404, description = "File not found", body = DeleteResult)
    ),
    tag = "files",
    params(
        ("id" = String, Path, description = "File id")
    ),
)]
pub async fn delete_file(
    Path(id): Path<String>,
    State(db): State<Database>,
) -> impl IntoResponse {
    let mut store = db.lock().await;
    let result = match store.remove(&id) {
        Ok(deleted) => {
            if deleted.files > 0 {
                tracing::info!("file: {id} deleted");
            } else {
                tracing::info!("file: {id} not exist");
            }
            deleted
        }
        Err(e) => {
            tracing::error!("file '{id}' not deleted. Error: {e}");
            DeleteResult::default()
        }
    };

    let status = if result.files == 0 {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(result))
}

fn make_error_response(e: &Error) -> Response {
    match e {
        Error::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()).into_response(),
        _ => {
            tracing::error!("Error: {e}");
            internal_server_error(e)
        }
    }
}

fn internal_server_error<E: ToString>(e: &E) -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}
