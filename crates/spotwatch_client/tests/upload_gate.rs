use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use spotwatch_client::{candidate_from_path, mime_type_for_path, Notifier, Severity, UploadGate};
use spotwatch_core::{FileCandidate, UploadRules, MAX_UPLOAD_BYTES};

#[derive(Default)]
struct RecordingNotifier(Mutex<Vec<(String, Severity)>>);

impl RecordingNotifier {
    fn take(&self) -> Vec<(String, Severity)> {
        self.0.lock().unwrap().drain(..).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, message: &str, severity: Severity) {
        self.0.lock().unwrap().push((message.to_string(), severity));
    }
}

fn gate() -> (UploadGate, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (
        UploadGate::new(UploadRules::default(), notifier.clone()),
        notifier,
    )
}

#[test]
fn allowed_types_within_limit_pass_silently() {
    let (gate, notifier) = gate();
    for mime in ["image/png", "image/jpeg", "image/jpg", "image/bmp", "image/tiff"] {
        assert!(gate.validate(&FileCandidate::new(mime, 1024)));
    }
    assert!(gate.validate(&FileCandidate::new("image/png", MAX_UPLOAD_BYTES)));
    assert!(notifier.take().is_empty());
}

#[test]
fn wrong_type_triggers_one_danger_notification() {
    let (gate, notifier) = gate();
    assert!(!gate.validate(&FileCandidate::new("application/pdf", 10)));
    assert_eq!(
        notifier.take(),
        vec![(
            "Please select a valid image file (PNG, JPG, JPEG, BMP, TIFF)".to_string(),
            Severity::Danger
        )]
    );
}

#[test]
fn oversize_triggers_one_danger_notification() {
    let (gate, notifier) = gate();
    assert!(!gate.validate(&FileCandidate::new("image/bmp", MAX_UPLOAD_BYTES + 1)));
    assert_eq!(
        notifier.take(),
        vec![(
            "File size must be less than 16MB".to_string(),
            Severity::Danger
        )]
    );
}

#[test]
fn both_violations_still_notify_once() {
    let (gate, notifier) = gate();
    assert!(!gate.validate(&FileCandidate::new("image/gif", MAX_UPLOAD_BYTES * 2)));
    assert_eq!(notifier.take().len(), 1);
}

#[test]
fn mime_type_follows_extension() {
    assert_eq!(mime_type_for_path(Path::new("gel.PNG")), "image/png");
    assert_eq!(mime_type_for_path(Path::new("gel.jpeg")), "image/jpeg");
    assert_eq!(mime_type_for_path(Path::new("gel.tif")), "image/tiff");
    assert_eq!(
        mime_type_for_path(Path::new("notes.txt")),
        "application/octet-stream"
    );
    assert_eq!(mime_type_for_path(Path::new("noext")), "application/octet-stream");
}

#[test]
fn candidate_reads_size_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".bmp").tempfile().unwrap();
    file.write_all(&[0u8; 300]).unwrap();
    file.flush().unwrap();

    let candidate = candidate_from_path(file.path()).unwrap();
    assert_eq!(candidate, FileCandidate::new("image/bmp", 300));
}
