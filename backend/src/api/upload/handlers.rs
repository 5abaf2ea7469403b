//! Handler functions for file uploads.
//!
//! Files arrive as a single multipart `file` field, are checked against the
//! configured size limit and an allow-list of content types, and are written
//! through the configured `FileAdapter`.

use adapters::{content_type_for, extension_for, generate_key, StoredFile};
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

pub const FILE_FIELD: &str = "file";

const ALLOWED_CONTENT_TYPES: [&str; 6] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "application/zip",
    "text/plain",
    "text/markdown",
];

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

impl From<StoredFile> for UploadResponse {
    fn from(file: StoredFile) -> Self {
        Self {
            url: file.url(),
            key: file.key,
            size: file.size,
            content_type: file.content_type,
        }
    }
}

/// Resolves the stored content type: the declared one without parameters,
/// falling back to the file name's extension when the client sent nothing
/// useful. Aliases collapse onto one canonical type.
fn resolve_content_type(declared: Option<&str>, file_name: Option<&str>) -> String {
    let declared = declared
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| !ct.is_empty() && ct != "application/octet-stream");

    let content_type =
        declared.unwrap_or_else(|| content_type_for(file_name.unwrap_or_default()).to_string());
    match content_type.as_str() {
        "application/x-zip-compressed" | "application/x-zip" => "application/zip".to_string(),
        "image/jpg" => "image/jpeg".to_string(),
        _ => content_type,
    }
}

fn is_allowed(content_type: &str) -> bool {
    ALLOWED_CONTENT_TYPES.contains(&content_type)
}

pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = resolve_content_type(field.content_type(), field.file_name());
        if !is_allowed(&content_type) {
            return Err(AppError::UnsupportedMediaType(format!(
                "File type {content_type} is not allowed"
            )));
        }
        // The key's extension follows the accepted type, not the client's file name.
        let key = generate_key(extension_for(&content_type));

        let data = field.bytes().await?;
        let max = state.config.max_upload_bytes;
        if data.len() > max {
            return Err(AppError::PayloadTooLarge(format!(
                "File exceeds the {max} byte limit"
            )));
        }
        if data.is_empty() {
            return Err(AppError::bad_request("File is empty"));
        }

        let stored = state.files.put(&key, &content_type, data).await?;
        info!(
            key = %stored.key,
            size = stored.size,
            adapter = state.files.name(),
            uploaded_by = %auth.id(),
            "file uploaded"
        );
        return Ok((StatusCode::CREATED, Json(stored.into())));
    }

    Err(AppError::bad_request("Missing file field"))
}

pub async fn serve(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (file, data): (StoredFile, Bytes) = state.files.get(&key).await?;
    Ok((
        [
            (CONTENT_TYPE, file.content_type),
            (CACHE_CONTROL, "private, max-age=3600".to_string()),
        ],
        data,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_type_wins_and_drops_parameters() {
        assert_eq!(
            resolve_content_type(Some("Text/Plain; charset=utf-8"), Some("notes.md")),
            "text/plain"
        );
    }

    #[test]
    fn test_generic_type_falls_back_to_file_name() {
        assert_eq!(
            resolve_content_type(Some("application/octet-stream"), Some("Report.PDF")),
            "application/pdf"
        );
        assert_eq!(resolve_content_type(None, Some("shot.png")), "image/png");
        assert_eq!(
            resolve_content_type(None, Some("report")),
            "application/octet-stream"
        );
        assert_eq!(resolve_content_type(None, None), "application/octet-stream");
    }

    #[test]
    fn test_zip_aliases_are_canonical() {
        assert_eq!(
            resolve_content_type(Some("application/x-zip-compressed"), Some("code.zip")),
            "application/zip"
        );
    }

    #[test]
    fn test_allow_list() {
        assert!(is_allowed("application/pdf"));
        assert!(is_allowed("text/markdown"));
        assert!(!is_allowed("application/octet-stream"));
        assert!(!is_allowed("text/html"));
    }

    #[test]
    fn test_every_allowed_type_has_a_key_extension() {
        for content_type in ALLOWED_CONTENT_TYPES {
            let ext = extension_for(content_type).unwrap();
            assert_eq!(content_type_for(&format!("k.{ext}")), content_type);
        }
    }
}
