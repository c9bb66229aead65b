use std::fs;
use std::path::Path;

use crate::capture::ImageBlob;

/// Platform file-selection surface. `None` means the user dismissed the
/// dialog without choosing.
pub trait FilePicker: Send {
    fn pick(&mut self) -> Option<ImageBlob>;
}

/// Picker backed by a filesystem path; returns the file's bytes unchanged
/// with a MIME type inferred from the extension.
pub struct PathFilePicker {
    path: Option<std::path::PathBuf>,
}

impl PathFilePicker {
    #[must_use]
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl FilePicker for PathFilePicker {
    fn pick(&mut self) -> Option<ImageBlob> {
        let path = self.path.take()?;
        let bytes = fs::read(&path).ok()?;
        Some(ImageBlob {
            mime_type: mime_type_for(&path),
            bytes,
        })
    }
}

fn mime_type_for(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        "heic" => "image/heic",
        // Scorecard photos are overwhelmingly JPEG; treat it as the default.
        _ => "image/jpeg",
    }
    .to_string()
}
