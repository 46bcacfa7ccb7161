//! Content classification derived from MIME types and file extensions.
//!
//! The coarse video/non-video split drives signed-URL TTL selection; the
//! finer classes drive document filtering and icon selection.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse content class of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileClass {
    /// PDF documents.
    Pdf,
    /// Raster or vector images.
    Image,
    /// Video files (shorter URL TTL window).
    Video,
    /// Audio files.
    Audio,
    /// Office and plain-text documents.
    Document,
    /// Everything else.
    Other,
}

impl FileClass {
    /// Classify from a MIME type with filename-extension fallback.
    pub fn classify(mime_type: Option<&str>, file_name: &str) -> Self {
        if let Some(mime) = mime_type {
            if let Some(class) = Self::from_mime(mime) {
                return class;
            }
        }
        let ext = extension_of(file_name).map(|e| e.to_ascii_lowercase());
        Self::from_extension(ext.as_deref())
    }

    /// Classify from a MIME type alone. Returns `None` when the type is
    /// unknown so the extension fallback can run.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.to_ascii_lowercase();
        if mime == "application/pdf" {
            return Some(Self::Pdf);
        }
        if mime.starts_with("video/") {
            return Some(Self::Video);
        }
        if mime.starts_with("image/") {
            return Some(Self::Image);
        }
        if mime.starts_with("audio/") {
            return Some(Self::Audio);
        }
        if mime.starts_with("text/")
            || mime.contains("msword")
            || mime.contains("wordprocessingml")
            || mime.contains("spreadsheetml")
            || mime.contains("presentationml")
            || mime.contains("ms-excel")
            || mime.contains("ms-powerpoint")
            || mime.contains("opendocument")
        {
            return Some(Self::Document);
        }
        None
    }

    /// Classify from a lowercase file extension.
    pub fn from_extension(ext: Option<&str>) -> Self {
        match ext {
            Some("pdf") => Self::Pdf,
            Some("jpg" | "jpeg" | "png" | "gif" | "bmp" | "webp" | "svg" | "tiff") => Self::Image,
            Some("mp4" | "mov" | "avi" | "mkv" | "webm" | "m4v" | "wmv") => Self::Video,
            Some("mp3" | "wav" | "ogg" | "flac" | "m4a" | "aac") => Self::Audio,
            Some(
                "doc" | "docx" | "xls" | "xlsx" | "ppt" | "pptx" | "txt" | "md" | "csv" | "rtf"
                | "odt" | "ods" | "odp",
            ) => Self::Document,
            _ => Self::Other,
        }
    }

    /// Whether this class uses the shorter video URL TTL window.
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }

    /// Stable string form (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl FromStr for FileClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(Self::Pdf),
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            "audio" => Ok(Self::Audio),
            "document" => Ok(Self::Document),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown file class: {s}")),
        }
    }
}

/// Extract the lowercase extension of a file name, if any.
fn extension_of(file_name: &str) -> Option<&str> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext)
}
