use axum::{
    body::Body,
    http::HeaderValue,
    response::{IntoResponse, Response},
};

use crate::domain::Payload;

/// Download reply: decoded payload bytes served as an attachment under the
/// record's original file name and embedded media type.
pub struct FileReply {
    payload: Payload,
}

impl FileReply {
    #[must_use]
    pub fn new(payload: Payload) -> Self {
        Self { payload }
    }

    fn attachment_name(&self) -> &str {
        let name = &self.payload.name;
        if let Some(ix) = name.rfind(['\\', '/']) {
            &name[ix + 1..]
        } else {
            name
        }
    }
}

impl IntoResponse for FileReply {
    fn into_response(self) -> Response {
        let file_name = self.attachment_name().to_owned();
        let media_type = self.payload.media_type.clone();
        let len = self.payload.bytes.len().to_string();
        let mut res = Body::from(self.payload.bytes).into_response();
        let content_type = HeaderValue::from_str(&media_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
        res.headers_mut().insert("content-type", content_type);
        let attachment = format!(r#"attachment; filename="{file_name}""#);
        if let Ok(val) = HeaderValue::from_str(attachment.as_str()) {
            res.headers_mut().insert("content-disposition", val);
        }
        if let Ok(val) = HeaderValue::from_str(len.as_str()) {
            res.headers_mut().insert("Content-Length", val);
        }

        res
    }
}
