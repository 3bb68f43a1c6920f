//! Shared helpers for driving the router in tests

#![cfg(test)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use llm_service::test_support::{ScriptedTextGenerator, StaticEmbedder};
use serde_json::Value;
use tower::ServiceExt;
use vendor_search::test_support::InMemoryVectorIndex;
use vendor_search::{MemoryVendorStore, VectorIndex};

use crate::{ApiGateway, GatewayOptions};

pub const BOUNDARY: &str = "planner-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub text: Arc<ScriptedTextGenerator>,
    pub store: Arc<MemoryVendorStore>,
}

impl TestApp {
    pub fn new(text: ScriptedTextGenerator) -> Self {
        Self::build(text, None)
    }

    pub fn with_index(text: ScriptedTextGenerator, index: Arc<InMemoryVectorIndex>) -> Self {
        Self::build(text, Some(index as Arc<dyn VectorIndex>))
    }

    fn build(text: ScriptedTextGenerator, index: Option<Arc<dyn VectorIndex>>) -> Self {
        let text = Arc::new(text);
        let store = Arc::new(MemoryVendorStore::default());
        let gateway = Arc::new(ApiGateway::new(
            text.clone(),
            Arc::new(StaticEmbedder::new(vec![0.1; 8])),
            store.clone(),
            index,
            GatewayOptions::default(),
        ));

        Self {
            router: gateway.create_router(),
            text,
            store,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> Response {
        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>) -> Response {
        self.send(
            Request::post(uri)
                .header(CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY))
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }
}

/// Single-file multipart body
pub fn multipart_file(field: &str, file_name: &str, content_type: &str, content: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
        b = BOUNDARY,
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
