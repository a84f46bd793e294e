//! In-memory transport for unit tests

use std::cell::RefCell;

use crate::config::AccessToken;
use crate::http::{HttpError, HttpRequest, HttpResponse, Transport};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError>>;

/// Answers every request through a closure and remembers what it saw
pub struct FakeTransport {
    responder: Responder,
    requests: RefCell<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + 'static,
    ) -> Self {
        Self {
            responder: Box::new(responder),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Answers the way a healthy GHES instance would, as user `alice`
    pub fn healthy() -> Self {
        Self::new(|req| Ok(healthy_response(req)))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// `METHOD url` for every request, in order
    pub fn request_lines(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url))
            .collect()
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = (self.responder)(&request);
        self.requests.borrow_mut().push(request);
        response
    }
}

/// Expected status for each kind of request a run makes
pub fn healthy_response(req: &HttpRequest) -> HttpResponse {
    match req.method.as_str() {
        "GET" if req.url.ends_with("/status") => HttpResponse::new(200, "GitHub lives!"),
        "GET" => HttpResponse::new(200, r#"{"login":"alice","id":1}"#),
        "DELETE" => HttpResponse::new(204, ""),
        _ => HttpResponse::new(201, "{}"),
    }
}

pub fn token() -> AccessToken {
    AccessToken::new(format!("ghp_{}", "a".repeat(36)))
}
