use std::io;
use std::path::Path;
use std::sync::Arc;

use spotwatch_core::{FileCandidate, UploadRules};
use spotwatch_logging::sw_debug;

use crate::notifier::{Notifier, Severity};

/// Client-side check run before a file is handed to the upload form.
pub struct UploadGate {
    rules: UploadRules,
    notifier: Arc<dyn Notifier>,
}

impl UploadGate {
    pub fn new(rules: UploadRules, notifier: Arc<dyn Notifier>) -> Self {
        Self { rules, notifier }
    }

    /// `true` when the file may be uploaded; otherwise one danger notification
    /// describing the violation is shown and `false` returned.
    pub fn validate(&self, file: &FileCandidate) -> bool {
        match self.rules.check(file) {
            Ok(()) => true,
            Err(rejection) => {
                sw_debug!("Rejected {:?}: {:?}", file, rejection);
                self.notifier.show(&rejection.to_string(), Severity::Danger);
                false
            }
        }
    }
}

/// MIME type implied by the file extension, matching what browsers report
/// for the image formats the server accepts.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

pub fn candidate_from_path(path: &Path) -> io::Result<FileCandidate> {
    let metadata = std::fs::metadata(path)?;
    Ok(FileCandidate::new(mime_type_for_path(path), metadata.len()))
}
