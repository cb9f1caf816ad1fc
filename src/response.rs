//! The response sink written by handlers and middleware.

use {
    bytes::{Bytes, BytesMut},
    http::{HeaderMap, StatusCode},
    http_body_util::Full,
};

/// Accumulates the status, headers and body of a response.
///
/// The status line is written at most once: the first call to
/// [`ResponseWriter::write_status`] wins and later calls are ignored. Writing
/// body bytes before any status implies `200 OK`. Headers stay mutable until
/// the writer is turned into an `http::Response`, so outer middleware can
/// still decorate a response after the inner handler has run.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes the status line unless one was already written.
    pub fn write_status(&mut self, status: StatusCode) {
        if self.status.is_none() {
            self.status = Some(status);
        }
    }

    /// Appends bytes to the body.
    pub fn write(&mut self, chunk: impl AsRef<[u8]>) {
        self.write_status(StatusCode::OK);
        self.body.extend_from_slice(chunk.as_ref());
    }

    /// The written status, or `200 OK` when nothing has been written yet.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    /// Whether a status line has been written.
    pub fn is_written(&self) -> bool {
        self.status.is_some()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(self.body.freeze()));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_first_status_wins() {
        let mut w = ResponseWriter::new();
        w.write_status(StatusCode::CREATED);
        w.write_status(StatusCode::NOT_FOUND);
        assert_eq!(w.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_body_write_implies_ok() {
        let mut w = ResponseWriter::new();
        assert!(!w.is_written());
        w.write("hello ");
        w.write(b"world");
        w.write_status(StatusCode::IM_A_TEAPOT);

        assert!(w.is_written());
        assert_eq!(w.status(), StatusCode::OK);
        assert_eq!(w.body(), b"hello world");
    }

    #[test]
    fn test_into_response_carries_everything() {
        let mut w = ResponseWriter::new();
        w.headers_mut()
            .insert("x-test", HeaderValue::from_static("yes"));
        w.write_status(StatusCode::ACCEPTED);

        let response = w.into_response();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(response.headers()["x-test"], "yes");
    }
}
