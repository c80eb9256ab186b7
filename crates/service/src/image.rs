//! Uploaded and stored image blobs.

pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// A file part received with a create or update request.
#[derive(Debug, Clone, Default)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Drops uploads with no content; an empty file part counts as "no file".
    pub fn non_empty(upload: Option<ImageUpload>) -> Option<ImageUpload> {
        upload.filter(|u| !u.bytes.is_empty())
    }

    /// `(image_name, image_type, image)` column values.
    pub fn into_columns(self) -> (Option<String>, Option<String>, Option<Vec<u8>>) {
        let content_type = self.content_type.filter(|c| !c.trim().is_empty());
        (self.file_name, content_type, Some(self.bytes))
    }
}

/// Image bytes as served by the `/image` sub-resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StoredImage {
    pub fn from_columns(image_type: Option<String>, image: Option<Vec<u8>>) -> Option<Self> {
        let bytes = image.filter(|b| !b.is_empty())?;
        let content_type = image_type.unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        Some(Self { content_type, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_upload_is_ignored() {
        let empty = ImageUpload { file_name: Some("a.png".into()), content_type: None, bytes: vec![] };
        assert!(ImageUpload::non_empty(Some(empty)).is_none());
        assert!(ImageUpload::non_empty(None).is_none());
    }

    #[test]
    fn stored_image_falls_back_to_octet_stream() {
        let img = StoredImage::from_columns(None, Some(vec![1, 2, 3])).unwrap();
        assert_eq!(img.content_type, FALLBACK_CONTENT_TYPE);
        assert!(StoredImage::from_columns(Some("image/png".into()), None).is_none());
    }
}
