use std::fmt;

use crate::format_file_size;

/// 16 MiB, the largest image the server accepts.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// The two fields of a selected file the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub mime_type: String,
    pub size: u64,
}

impl FileCandidate {
    pub fn new(mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            mime_type: mime_type.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRules {
    pub allowed_types: Vec<String>,
    pub max_bytes: u64,
}

impl Default for UploadRules {
    fn default() -> Self {
        Self {
            allowed_types: ["image/png", "image/jpeg", "image/jpg", "image/bmp", "image/tiff"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            max_bytes: MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadRules {
    /// Type is checked before size; the first violation wins.
    pub fn check(&self, file: &FileCandidate) -> Result<(), UploadRejection> {
        if !self
            .allowed_types
            .iter()
            .any(|allowed| allowed == &file.mime_type)
        {
            return Err(UploadRejection::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }
        if file.size > self.max_bytes {
            return Err(UploadRejection::TooLarge {
                size: file.size,
                max_bytes: self.max_bytes,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    UnsupportedType { mime_type: String },
    TooLarge { size: u64, max_bytes: u64 },
}

impl fmt::Display for UploadRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadRejection::UnsupportedType { .. } => write!(
                f,
                "Please select a valid image file (PNG, JPG, JPEG, BMP, TIFF)"
            ),
            UploadRejection::TooLarge { max_bytes, .. } => write!(
                f,
                "File size must be less than {}",
                format_file_size(*max_bytes).replace(' ', "")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_allowed_type_at_size_limit() {
        let rules = UploadRules::default();
        assert_eq!(
            rules.check(&FileCandidate::new("image/tiff", MAX_UPLOAD_BYTES)),
            Ok(())
        );
    }

    #[test]
    fn rejects_unknown_type_before_size() {
        let rules = UploadRules::default();
        let err = rules
            .check(&FileCandidate::new("image/gif", MAX_UPLOAD_BYTES + 1))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select a valid image file (PNG, JPG, JPEG, BMP, TIFF)"
        );
    }

    #[test]
    fn rejects_one_byte_over_limit() {
        let rules = UploadRules::default();
        let err = rules
            .check(&FileCandidate::new("image/png", MAX_UPLOAD_BYTES + 1))
            .unwrap_err();
        assert_eq!(
            err,
            UploadRejection::TooLarge {
                size: MAX_UPLOAD_BYTES + 1,
                max_bytes: MAX_UPLOAD_BYTES
            }
        );
        assert_eq!(err.to_string(), "File size must be less than 16MB");
    }
}
