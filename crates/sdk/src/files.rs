//! Loading local files into upload payloads

use pubhub_core::domain::MediaFile;
use pubhub_core::Result;
use std::path::Path;

/// Read a file and guess its content type from the extension
pub async fn load_media(path: impl AsRef<Path>) -> Result<MediaFile> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(MediaFile::new(file_name, content_type_for(path), bytes))
}

pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "mp4" => "video/mp4",
        "m4v" => "video/x-m4v",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "avi" => "video/x-msvideo",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "text/javascript",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}
