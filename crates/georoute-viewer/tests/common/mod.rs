//! Local stand-in for the identity and routes services.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::Utc;
use georoute_viewer::ViewerConfig;
use serde_json::{json, Value};
use tokio::sync::Notify;

pub const POOL_ID: &str = "ap-northeast-1:aaaaaaaa-bbbb-cccc-dddd-eeeeeeeeeeee";

#[derive(Clone)]
pub enum RoutesMode {
    /// One route, one leg, straight from origin to destination.
    Echo,
    Fixed(Value),
    Status(StatusCode, Value),
}

#[derive(Clone)]
pub struct Services {
    pub identity_ok: bool,
    pub routes: RoutesMode,
    /// Hold route requests whose origin longitude matches until released.
    pub held_origin: Option<f64>,
    pub gate: Gate,
    pub route_calls: Arc<AtomicUsize>,
}

/// Signals arrival of a held request and lets the test release it.
#[derive(Clone, Default)]
pub struct Gate {
    arrived: Arc<Notify>,
    release: Arc<Notify>,
}

impl Gate {
    pub async fn arrived(&self) {
        self.arrived.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }

    async fn hold(&self) {
        self.arrived.notify_one();
        self.release.notified().await;
    }
}

impl Services {
    pub fn new(routes: RoutesMode) -> Self {
        Self {
            identity_ok: true,
            routes,
            held_origin: None,
            gate: Gate::default(),
            route_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn route_calls(&self) -> usize {
        self.route_calls.load(Ordering::SeqCst)
    }

    /// Serve both services on one ephemeral port and return a matching config.
    pub async fn start(self) -> ViewerConfig {
        let router = Router::new()
            .route("/", post(identity))
            .route("/v2/routes", post(routes))
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });

        let base = format!("http://{}", addr);
        ViewerConfig {
            region: "ap-northeast-1".to_string(),
            api_key: "v1.public.test".to_string(),
            identity_pool_id: POOL_ID.to_string(),
            routes_endpoint: Some(base.clone()),
            identity_endpoint: Some(base),
            ..ViewerConfig::default()
        }
    }
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::HeaderName::from_static("x-amz-geo-pricing-bucket"), "Core"),
        ],
        body.to_string(),
    )
        .into_response()
}

async fn identity(State(services): State<Services>, headers: HeaderMap) -> Response {
    if !services.identity_ok {
        let body = json!({ "__type": "ResourceNotFoundException", "message": "IdentityPool not found" });
        return json_response(StatusCode::BAD_REQUEST, &body);
    }

    let target = headers
        .get("x-amz-target")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let body = if target.ends_with(".GetId") {
        json!({ "IdentityId": "ap-northeast-1:identity" })
    } else {
        json!({
            "IdentityId": "ap-northeast-1:identity",
            "Credentials": {
                "AccessKeyId": "ASIATESTKEY",
                "SecretKey": "test-secret",
                "SessionToken": "test-session-token",
                "Expiration": (Utc::now().timestamp() + 3600) as f64
            }
        })
    };
    json_response(StatusCode::OK, &body)
}

async fn routes(State(services): State<Services>, body: String) -> Response {
    services.route_calls.fetch_add(1, Ordering::SeqCst);
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);

    if let Some(lon) = services.held_origin {
        if request["Origin"][0].as_f64() == Some(lon) {
            services.gate.hold().await;
        }
    }

    match &services.routes {
        RoutesMode::Echo => {
            let response = json!({
                "Routes": [{
                    "Legs": [{
                        "Geometry": { "LineString": [request["Origin"], request["Destination"]] }
                    }]
                }]
            });
            json_response(StatusCode::OK, &response)
        }
        RoutesMode::Fixed(value) => json_response(StatusCode::OK, value),
        RoutesMode::Status(status, value) => json_response(*status, value),
    }
}
