//! Shared fixtures for integration tests.
//!
//! [`MockTransport`] records every request and answers from a queue of
//! canned responses (an empty queue answers `200` with an empty body).

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tracker_rest::clients::{HttpError, HttpRequest, HttpResponse, HttpResponseError, Transport};
use tracker_rest::rest::{
    ApiClient, Attributes, RelationOptions, ResourceMetadata, ResourceRegistry,
};

pub const BASE: &str = "/rest/api/2";

#[derive(Debug, Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<(u16, String)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queues the response for the next request.
    pub fn respond(&self, code: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back((code, body.into()));
    }

    /// Queues a JSON response for the next request.
    pub fn respond_json(&self, code: u16, body: Value) {
        self.respond(code, body.to_string());
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn rest_base_path(&self) -> &str {
        BASE
    }

    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        self.requests.lock().unwrap().push(request.clone());

        let (code, body) = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((200, String::new()));
        let response = HttpResponse::new(code, HashMap::new(), body);

        if response.is_ok() {
            Ok(response)
        } else {
            Err(HttpError::Response(HttpResponseError {
                path: request.path,
                response,
            }))
        }
    }
}

/// A small tracker schema: projects with versions, issues with comments,
/// worklogs, a reporter and a status, and wrapped dashboard listings.
pub fn registry() -> ResourceRegistry {
    ResourceRegistry::builder()
        .register(
            ResourceMetadata::builder("Project")
                .key_attribute("key")
                .has_many("versions", RelationOptions::new())
                .build()
                .unwrap(),
        )
        .register(
            ResourceMetadata::builder("Version")
                .belongs_to("project")
                .build()
                .unwrap(),
        )
        .register(
            ResourceMetadata::builder("Issue")
                .has_one(
                    "reporter",
                    RelationOptions::new()
                        .nested_under(["fields"])
                        .child_type("User"),
                )
                .has_one("status", RelationOptions::new().nested_under(["fields"]))
                .has_many(
                    "comments",
                    RelationOptions::new().nested_under(["fields", "comment"]),
                )
                .has_many(
                    "worklogs",
                    RelationOptions::new().nested_under(["fields", "worklog"]),
                )
                .build()
                .unwrap(),
        )
        .register(
            ResourceMetadata::builder("Comment")
                .belongs_to("issue")
                .build()
                .unwrap(),
        )
        .register(
            ResourceMetadata::builder("Worklog")
                .belongs_to("issue")
                .build()
                .unwrap(),
        )
        .register(
            ResourceMetadata::builder("User")
                .key_attribute("name")
                .build()
                .unwrap(),
        )
        .register(ResourceMetadata::builder("Status").build().unwrap())
        .register(
            ResourceMetadata::builder("Dashboard")
                .nested_collections(true)
                .build()
                .unwrap(),
        )
        .build()
        .unwrap()
}

/// Returns a client over a fresh mock transport, and the transport.
pub fn client() -> (ApiClient, Arc<MockTransport>) {
    let transport = MockTransport::new();
    let dyn_transport: Arc<dyn Transport> = transport.clone();
    (ApiClient::new(dyn_transport, registry()), transport)
}

/// Converts a `json!` object literal into attributes.
pub fn obj(value: Value) -> Attributes {
    value.as_object().cloned().expect("expected a JSON object")
}

/// Parses the body of a recorded request.
pub fn body_of(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().expect("request has no body")).unwrap()
}
