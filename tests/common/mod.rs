//! Stub CAPTCHA and Mailtrap endpoints for driving the router end to end.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use mail_relay::config::{Config, LogFormat, DEFAULT_SENDER_NAME};
use mail_relay::{api, AppState};

pub const CAPTCHA_SECRET: &str = "captcha-secret";
pub const HUMAN_TOKEN: &str = "human-token";
pub const HUMAN_BEARER: &str = "Bearer human-token";
pub const MAILTRAP_TOKEN: &str = "mailtrap-token";
pub const SENDER_EMAIL: &str = "noreply@relay.test";
pub const RECEIVER_EMAIL: &str = "inbox@relay.test";

#[derive(Clone, Default)]
pub struct Recorder {
    pub captcha_calls: Arc<AtomicUsize>,
    pub deliveries: Arc<Mutex<Vec<Value>>>,
}

impl Recorder {
    pub fn captcha_calls(&self) -> usize {
        self.captcha_calls.load(Ordering::SeqCst)
    }

    pub fn deliveries(&self) -> Vec<Value> {
        self.deliveries.lock().unwrap().clone()
    }
}

/// Relay router wired to stub upstreams, plus what the upstreams saw.
pub struct TestApp {
    pub router: Router,
    pub recorder: Recorder,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let recorder = Recorder::default();
        let addr = spawn_upstream(recorder.clone()).await;
        let base = format!("http://{}", addr);

        Self::with_endpoints(
            recorder,
            format!("{}/siteverify", base),
            base,
            Some(RECEIVER_EMAIL),
        )
    }

    /// Deployment that never set a contact-form receiver address.
    pub async fn spawn_without_receiver() -> Self {
        let recorder = Recorder::default();
        let addr = spawn_upstream(recorder.clone()).await;
        let base = format!("http://{}", addr);

        Self::with_endpoints(recorder, format!("{}/siteverify", base), base, None)
    }

    /// Verification endpoint that refuses connections.
    pub async fn spawn_with_unreachable_captcha() -> Self {
        let recorder = Recorder::default();
        let addr = spawn_upstream(recorder.clone()).await;

        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let closed_addr = closed.local_addr().unwrap();
        drop(closed);

        Self::with_endpoints(
            recorder,
            format!("http://{}/siteverify", closed_addr),
            format!("http://{}", addr),
            Some(RECEIVER_EMAIL),
        )
    }

    fn with_endpoints(
        recorder: Recorder,
        captcha_verify_url: String,
        mailtrap_api_url: String,
        receiver_email: Option<&str>,
    ) -> Self {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            mailtrap_token: MAILTRAP_TOKEN.to_string(),
            mailtrap_api_url,
            captcha_secret: CAPTCHA_SECRET.to_string(),
            captcha_verify_url,
            sender_name: DEFAULT_SENDER_NAME.to_string(),
            sender_email: SENDER_EMAIL.to_string(),
            receiver_email: receiver_email.map(str::to_string),
            log_format: LogFormat::Pretty,
        };

        Self {
            router: api::create_router(AppState::from_config(config)),
            recorder,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.call(request).await
    }

    pub async fn post(&self, uri: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.call(request).await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        auth: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, auth)
            .body(Body::from(body))
            .unwrap();
        self.call(request).await
    }

    /// Plain body with no `Content-Type`, as simple form posts send it.
    pub async fn post_untyped(
        &self,
        uri: &str,
        auth: &str,
        body: &'static str,
    ) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::AUTHORIZATION, auth)
            .body(Body::from(body))
            .unwrap();
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

async fn spawn_upstream(recorder: Recorder) -> SocketAddr {
    let app = Router::new()
        .route("/siteverify", post(siteverify))
        .route("/api/send", post(mailtrap_send))
        .with_state(recorder);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn siteverify(
    State(recorder): State<Recorder>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    recorder.captcha_calls.fetch_add(1, Ordering::SeqCst);

    let ok = params.get("secret").map(String::as_str) == Some(CAPTCHA_SECRET)
        && params.get("response").map(String::as_str) == Some(HUMAN_TOKEN);

    if ok {
        Json(json!({ "success": true, "hostname": "relay.test" }))
    } else {
        Json(json!({ "success": false, "error-codes": ["invalid-input-response"] }))
    }
}

async fn mailtrap_send(
    State(recorder): State<Recorder>,
    headers: HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(format!("Bearer {}", MAILTRAP_TOKEN).as_str());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "errors": ["Unauthorized"] })),
        );
    }

    let to = payload["to"].as_array().cloned().unwrap_or_default();
    let id = {
        let mut deliveries = recorder.deliveries.lock().unwrap();
        deliveries.push(payload);
        deliveries.len()
    };

    if to.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "errors": ["'to' address is required"] })),
        );
    }
    if to.iter().any(|address| !address["email"].is_string()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "errors": ["'to' address is invalid"] })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({ "success": true, "message_ids": [format!("msg-{}", id)] })),
    )
}
