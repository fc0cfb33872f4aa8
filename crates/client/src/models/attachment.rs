//! Binary uploads sent as multipart parts.

use reqwest::multipart::Part;

use crate::error::ApiError;

/// A file to upload alongside a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg` or `application/pdf`.
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment from raw parts.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Convert to a multipart part.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the content type is not a valid
    /// MIME type.
    pub fn to_part(&self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.content_type)
            .map_err(|e| {
                ApiError::InvalidRequest(format!(
                    "attachment {} has invalid content type {}: {e}",
                    self.file_name, self.content_type
                ))
            })
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mime_is_rejected() {
        let attachment = Attachment::new("id.pdf", "not a mime", b"%PDF".to_vec());
        assert!(matches!(attachment.to_part(), Err(ApiError::InvalidRequest(_))));
        assert!(Attachment::new("id.pdf", "application/pdf", b"%PDF".to_vec()).to_part().is_ok());
    }

    #[test]
    fn test_debug_omits_contents() {
        let attachment = Attachment::new("photo.jpg", "image/jpeg", vec![0xFF; 2048]);
        let debug_output = format!("{attachment:?}");
        assert!(debug_output.contains("2048"));
        assert!(!debug_output.contains("255"));
    }
}
