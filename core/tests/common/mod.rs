//! In-memory transport for pipeline tests.

#![allow(dead_code)]

use std::sync::Mutex;

use apiclient_core::{Headers, HttpRequest, HttpResponse, Transport, TransportError};
use async_trait::async_trait;

enum Script {
    Respond(HttpResponse),
    Refuse(String),
}

/// Answers every request the same way and records what it was sent.
pub struct ScriptedTransport {
    script: Script,
    seen: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn responding(response: HttpResponse) -> Self {
        Self {
            script: Script::Respond(response),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with a connection-refused network error.
    pub fn refusing(message: &str) -> Self {
        Self {
            script: Script::Refuse(message.to_string()),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("transport was never called")
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.script {
            Script::Respond(response) => Ok(response.clone()),
            Script::Refuse(message) => Err(TransportError::Network(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                message.clone(),
            )))),
        }
    }
}

pub fn response(status: u16, content_type: &str, body: &str) -> HttpResponse {
    let mut headers = Headers::new();
    headers.set("content-type", content_type);
    HttpResponse {
        status,
        headers,
        body: body.as_bytes().to_vec(),
    }
}

pub fn json_response(status: u16, body: &str) -> HttpResponse {
    response(status, "application/json", body)
}
