//! Image upload handlers

use std::path::{Path, PathBuf};

use axum::{
    Json,
    extract::{Multipart, Query, State},
};
use chrono::Utc;
use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{ApiResponse, ApiResult, AppError, AppResult, ErrorCode, ok};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

const SUPPORTED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Public URL prefix of uploaded menu images
const PUBLIC_PREFIX: &str = "/uploads/menu/";
const MENU_DIR: &str = "menu";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// `/uploads/menu/<stored name>`
    pub path: String,
    pub original_name: String,
    pub size: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    pub path: Option<String>,
}

/// Replace everything outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn format_for_extension(ext: &str) -> Option<ImageFormat> {
    match ext {
        "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
        "png" => Some(ImageFormat::Png),
        "gif" => Some(ImageFormat::Gif),
        "webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

fn format_for_content_type(content_type: &str) -> Option<ImageFormat> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
        "image/png" => Some(ImageFormat::Png),
        "image/gif" => Some(ImageFormat::Gif),
        "image/webp" => Some(ImageFormat::WebP),
        _ => None,
    }
}

/// Extension, declared content type and the bytes themselves must agree
/// on one supported image format.
pub fn validate_image(data: &[u8], file_name: &str, content_type: &str) -> AppResult<ImageFormat> {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let format = format_for_extension(&ext).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        )
    })?;

    if format_for_content_type(content_type) != Some(format) {
        return Err(AppError::new(ErrorCode::UnsupportedFileFormat)
            .with_detail("extension", ext)
            .with_detail("contentType", content_type));
    }

    match image::guess_format(data) {
        Ok(found) if found == format => {}
        _ => {
            return Err(AppError::new(ErrorCode::InvalidImage).with_detail("extension", ext));
        }
    }
    image::load_from_memory_with_format(data, format).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImage, format!("Invalid image file ({ext}): {e}"))
    })?;

    Ok(format)
}

fn menu_dir(state: &ServerState) -> PathBuf {
    state.config.upload_dir.join(MENU_DIR)
}

/// POST /api/upload
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
        if format_for_content_type(&content_type).is_none() {
            return Err(AppError::new(ErrorCode::UnsupportedFileFormat)
                .with_detail("contentType", content_type));
        }

        let data = field.bytes().await.map_err(|e| {
            AppError::with_message(ErrorCode::FileTooLarge, format!("Failed to read file: {e}"))
        })?;
        if data.is_empty() {
            return Err(AppError::new(ErrorCode::EmptyFile));
        }
        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::new(ErrorCode::FileTooLarge)
                .with_detail("size", data.len())
                .with_detail("maxSize", MAX_FILE_SIZE));
        }

        let safe_name = sanitize_file_name(&original_name);
        validate_image(&data, &safe_name, &content_type)?;

        let file_name = format!("{}_{}", Utc::now().timestamp_millis(), safe_name);
        let dir = menu_dir(&state);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::storage(format!("Failed to create upload dir: {e}")))?;
        tokio::fs::write(dir.join(&file_name), &data)
            .await
            .map_err(|e| AppError::storage(format!("Failed to save file: {e}")))?;

        tracing::info!(file = %file_name, size = data.len(), "Image uploaded");

        return Ok(ok(UploadResponse {
            path: format!("{PUBLIC_PREFIX}{file_name}"),
            original_name,
            size: data.len(),
        }));
    }

    Err(AppError::new(ErrorCode::NoFileProvided))
}

/// DELETE /api/upload?path=
pub async fn delete(
    State(state): State<ServerState>,
    Query(query): Query<DeleteQuery>,
) -> ApiResult<()> {
    let path = query.path.unwrap_or_default();
    let file_name = path
        .strip_prefix(PUBLIC_PREFIX)
        .filter(|name| {
            !name.is_empty()
                && !name.contains(['/', '\\'])
                && *name != "."
                && *name != ".."
        })
        .ok_or_else(|| AppError::new(ErrorCode::InvalidFilePath).with_detail("path", path.clone()))?;

    let full_path = menu_dir(&state).join(file_name);
    match tokio::fs::remove_file(&full_path).await {
        Ok(()) => {
            tracing::info!(file = %file_name, "Image deleted");
            Ok(Json(ApiResponse::ok()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::new(ErrorCode::FileNotFound).with_detail("path", path.clone()))
        }
        Err(e) => Err(AppError::storage(format!("Failed to delete file: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image::RgbImage::new(3, 3).write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_validate_image_accepts_matching_formats() {
        let png = encode(ImageFormat::Png);
        assert_eq!(
            validate_image(&png, "dish.PNG", "image/png").unwrap(),
            ImageFormat::Png
        );
        let jpeg = encode(ImageFormat::Jpeg);
        assert_eq!(
            validate_image(&jpeg, "dish.jpg", "image/jpeg").unwrap(),
            ImageFormat::Jpeg
        );
        let gif = encode(ImageFormat::Gif);
        assert_eq!(
            validate_image(&gif, "dish.gif", "image/gif").unwrap(),
            ImageFormat::Gif
        );
    }

    #[test]
    fn test_validate_image_rejects_foreign_extension() {
        let png = encode(ImageFormat::Png);
        for name in ["x.html", "x.svg", "x", "x.png.html"] {
            let err = validate_image(&png, name, "image/png").unwrap_err();
            assert_eq!(err.code, ErrorCode::UnsupportedFileFormat, "{name}");
        }
    }

    #[test]
    fn test_validate_image_rejects_content_type_mismatch() {
        let png = encode(ImageFormat::Png);
        let err = validate_image(&png, "x.png", "image/jpeg").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnsupportedFileFormat);
    }

    #[test]
    fn test_validate_image_rejects_non_image_bytes() {
        let err = validate_image(b"<script>alert(1)</script>", "x.png", "image/png").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImage);

        // png bytes behind a jpeg name and type
        let png = encode(ImageFormat::Png);
        let err = validate_image(&png, "x.jpg", "image/jpeg").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImage);

        // valid signature, truncated body
        let err = validate_image(&png[..16], "x.png", "image/png").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidImage);
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("ramen bowl.png"), "ramen_bowl.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("寿司.jpg"), "__.jpg");
    }
}
