//! The handler-facing response shape, finalized into a `(status, headers,
//! body_bytes)` triple by the dispatcher (§4.4).

/// A handler's response body before the dispatcher's charset/encoding pass.
#[derive(Debug, Clone)]
pub enum Body {
    Empty,
    /// Text the dispatcher UTF-8 encodes, appending `; charset=utf-8` to
    /// `Content-Type`.
    Text(String),
}

/// A handler's response, prior to final encoding.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl Response {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Body::Empty,
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn with_text_body(mut self, content_type: impl Into<String>, body: impl Into<String>) -> Self {
        self.headers.push(("Content-Type".to_string(), content_type.into()));
        self.body = Body::Text(body.into());
        self
    }

    /// A short plain-text error response, per §7.
    #[must_use]
    pub fn plain_text(status: u16, message: impl Into<String>) -> Self {
        Self::new(status).with_text_body("text/plain", message)
    }
}

/// The dispatcher's final output: status, headers, and a fully encoded body.
#[derive(Debug, Clone)]
pub struct FinalResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl From<Response> for FinalResponse {
    fn from(response: Response) -> Self {
        let Response { status, mut headers, body } = response;
        let body_bytes = match body {
            Body::Empty => Vec::new(),
            Body::Text(text) => {
                if let Some((_, content_type)) = headers.iter_mut().find(|(name, _)| name == "Content-Type") {
                    content_type.push_str("; charset=utf-8");
                }
                text.into_bytes()
            }
        };
        Self {
            status,
            headers,
            body: body_bytes,
        }
    }
}
