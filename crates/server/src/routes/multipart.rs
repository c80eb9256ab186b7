//! Multipart bodies carrying a JSON record part plus an optional image file part.

use axum::extract::{multipart::MultipartRejection, Multipart};
use serde::de::DeserializeOwned;
use tracing::debug;

use service::image::ImageUpload;

use crate::errors::JsonApiError;

pub const IMAGE_FIELD: &str = "imageFile";

/// Reads `data_field` as JSON into `T` and `imageFile` as raw bytes; other parts are skipped.
pub async fn read_form<T: DeserializeOwned>(
    multipart: Result<Multipart, MultipartRejection>,
    data_field: &str,
) -> Result<(T, Option<ImageUpload>), JsonApiError> {
    let mut multipart = multipart?;
    let mut data: Option<T> = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| JsonApiError::bad_request(format!("malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == data_field {
            let raw = field
                .bytes()
                .await
                .map_err(|e| JsonApiError::bad_request(format!("failed to read {data_field}: {e}")))?;
            let parsed = serde_json::from_slice(&raw)
                .map_err(|e| JsonApiError::bad_request(format!("invalid {data_field}: {e}")))?;
            data = Some(parsed);
        } else if name == IMAGE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| JsonApiError::bad_request(format!("failed to read {IMAGE_FIELD}: {e}")))?;
            debug!(file_name = ?file_name, size = bytes.len(), "image part received");
            image = Some(ImageUpload { file_name, content_type, bytes: bytes.to_vec() });
        } else {
            debug!(field = %name, "ignoring unknown multipart field");
        }
    }

    let data = data.ok_or_else(|| JsonApiError::bad_request(format!("missing multipart field {data_field}")))?;
    Ok((data, image))
}
