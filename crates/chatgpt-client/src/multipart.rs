//! Multipart bodies for file upload, image edit and image variation.
//!
//! Bodies are built as a plain ordered list of [`FormPart`]s first and only
//! converted to a `reqwest` form at send time, so they can be inspected.
//! Scalar fields come first in declaration order, binary parts after them.
//! Optional fields that are unset produce no part at all.
//!
//! Every referenced file is read before the body is returned; a missing or
//! unreadable file fails here, before any request exists.

use std::fs;
use std::path::Path;

use chatgpt_core::defaults;
use chatgpt_core::{CreateImageEditRequest, CreateImageVariationRequest, Error, Result};
use reqwest::blocking::multipart::{Form, Part};
use tracing::debug;

/// Content of one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
}

/// One named field of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub payload: Payload,
}

/// Ordered multipart body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<FormPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: None,
            content_type: None,
            payload: Payload::Text(value.into()),
        });
        self
    }

    /// Append a scalar field only when `value` is set.
    pub fn optional_text<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.text(name, value.to_string()),
            None => self,
        }
    }

    /// Append a binary part.
    pub fn bytes(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            payload: Payload::Bytes(bytes),
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Field names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&FormPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Convert to a `reqwest` form, preserving order.
    pub fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for part in self.parts {
            let FormPart {
                name,
                file_name,
                content_type,
                payload,
            } = part;

            let mut body = match payload {
                Payload::Text(text) => {
                    if file_name.is_none() && content_type.is_none() {
                        form = form.text(name, text);
                        continue;
                    }
                    Part::text(text)
                }
                Payload::Bytes(bytes) => Part::bytes(bytes),
            };
            if let Some(file_name) = file_name {
                body = body.file_name(file_name);
            }
            if let Some(content_type) = content_type {
                body = body.mime_str(&content_type).map_err(|e| {
                    Error::InvalidInput(format!(
                        "invalid content type {} for part {}: {}",
                        content_type, name, e
                    ))
                })?;
            }
            form = form.part(name, body);
        }
        Ok(form)
    }
}

/// Body for `POST /v1/files`: a `purpose` field and the file under `file`,
/// with the path as given kept as the file name.
pub fn upload_file(purpose: &str, path: impl AsRef<Path>) -> Result<MultipartBody> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let content_type = negotiate_content_type(&bytes, defaults::UPLOAD_FALLBACK_MIME);

    debug!(
        path = %path.display(),
        size = bytes.len(),
        content_type = %content_type,
        "Built file upload body"
    );

    Ok(MultipartBody::new().text("purpose", purpose).bytes(
        "file",
        path.to_string_lossy(),
        content_type,
        bytes,
    ))
}

/// Body for `POST /v1/images/edits`.
pub fn image_edit(
    request: &CreateImageEditRequest,
    image: impl AsRef<Path>,
    mask: Option<&Path>,
) -> Result<MultipartBody> {
    let image = read_file(image.as_ref())?;
    let mask = mask.map(read_file).transpose()?;

    let mut body = MultipartBody::new()
        .text("prompt", request.prompt.as_str())
        .optional_text("size", request.size.as_deref())
        .optional_text("response_format", request.response_format.as_deref())
        .optional_text("n", request.n)
        .optional_text("user", request.user.as_deref());

    body = image_part(body, "image", image);
    if let Some(mask) = mask {
        body = image_part(body, "mask", mask);
    }
    Ok(body)
}

/// Body for `POST /v1/images/variations`.
pub fn image_variation(
    request: &CreateImageVariationRequest,
    image: impl AsRef<Path>,
) -> Result<MultipartBody> {
    let image = read_file(image.as_ref())?;

    let body = MultipartBody::new()
        .optional_text("size", request.size.as_deref())
        .optional_text("response_format", request.response_format.as_deref())
        .optional_text("n", request.n)
        .optional_text("user", request.user.as_deref());

    Ok(image_part(body, "image", image))
}

fn image_part(body: MultipartBody, name: &str, bytes: Vec<u8>) -> MultipartBody {
    let content_type = negotiate_content_type(&bytes, defaults::IMAGE_FALLBACK_MIME);
    body.bytes(name, name, content_type, bytes)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Content type from magic bytes, or `fallback` when nothing matches.
pub fn negotiate_content_type(bytes: &[u8], fallback: &str) -> String {
    infer::get(bytes)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    fn temp_file(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    fn edit_request(n: Option<u32>) -> CreateImageEditRequest {
        CreateImageEditRequest {
            prompt: "A cute baby sea otter wearing a beret".to_string(),
            size: Some("256x256".to_string()),
            response_format: Some("url".to_string()),
            n,
            user: None,
        }
    }

    #[test]
    fn test_upload_file_parts() {
        let file = temp_file(b"{\"prompt\":\"a\",\"completion\":\"b\"}\n");
        let path = file.path().to_string_lossy().to_string();

        let body = upload_file("fine-tune", &path).unwrap();
        assert_eq!(body.names(), vec!["purpose", "file"]);
        assert_eq!(
            body.get("purpose").unwrap().payload,
            Payload::Text("fine-tune".to_string())
        );

        let part = body.get("file").unwrap();
        assert_eq!(part.file_name.as_deref(), Some(path.as_str()));
        assert_eq!(part.content_type.as_deref(), Some("text/plain"));
        assert_eq!(
            part.payload,
            Payload::Bytes(b"{\"prompt\":\"a\",\"completion\":\"b\"}\n".to_vec())
        );
    }

    #[test]
    fn test_upload_missing_file_fails_fast() {
        let err = upload_file("fine-tune", "/definitely/not/here.jsonl").unwrap_err();
        match err {
            Error::Io { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.jsonl"))
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_image_edit_without_n_or_mask() {
        let image = temp_file(PNG_HEADER);
        let body = image_edit(&edit_request(None), image.path(), None).unwrap();

        assert_eq!(body.names(), vec!["prompt", "size", "response_format", "image"]);
        assert!(body.get("n").is_none());
        assert!(body.get("mask").is_none());
    }

    #[test]
    fn test_image_edit_with_n_and_mask() {
        let image = temp_file(PNG_HEADER);
        let mask_bytes = [PNG_HEADER, b"mask"].concat();
        let mask = temp_file(&mask_bytes);

        let body = image_edit(&edit_request(Some(4)), image.path(), Some(mask.path())).unwrap();

        assert_eq!(
            body.names(),
            vec!["prompt", "size", "response_format", "n", "image", "mask"]
        );
        assert_eq!(body.get("n").unwrap().payload, Payload::Text("4".to_string()));

        let mask_part = body.get("mask").unwrap();
        assert_eq!(mask_part.payload, Payload::Bytes(mask_bytes));
        assert_eq!(mask_part.file_name.as_deref(), Some("mask"));
        assert_eq!(mask_part.content_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn test_image_edit_missing_mask_fails_fast() {
        let image = temp_file(PNG_HEADER);
        let err = image_edit(
            &edit_request(None),
            image.path(),
            Some(Path::new("/no/such/mask.png")),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_image_variation_parts() {
        let image = temp_file(PNG_HEADER);
        let request = CreateImageVariationRequest {
            n: Some(2),
            ..Default::default()
        };

        let body = image_variation(&request, image.path()).unwrap();
        assert_eq!(body.names(), vec!["n", "image"]);
        assert!(body.get("prompt").is_none());
        assert!(body.get("mask").is_none());
    }

    #[test]
    fn test_negotiate_content_type() {
        assert_eq!(negotiate_content_type(PNG_HEADER, "x/y"), "image/png");
        assert_eq!(
            negotiate_content_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10], "x/y"),
            "image/jpeg"
        );
        assert_eq!(negotiate_content_type(b"plain words", "text/plain"), "text/plain");
    }

    #[test]
    fn test_into_form_rejects_bad_content_type() {
        let body = MultipartBody::new().bytes("file", "f", "not a mime", vec![1, 2, 3]);
        assert!(matches!(body.into_form(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_into_form_accepts_mixed_parts() {
        let body = MultipartBody::new()
            .text("purpose", "fine-tune")
            .bytes("file", "data.jsonl", "text/plain", b"{}".to_vec());
        assert!(body.into_form().is_ok());
    }
}
