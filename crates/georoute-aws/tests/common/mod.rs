//! In-process stand-ins for the identity and routes services.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use georoute_aws::{load_shared_config, CognitoCredentialsProvider, Credentials, GeoRoutesClient};
use serde_json::{json, Value};

/// Bind `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve stub");
    });
    format!("http://{}", addr)
}

/// A captured request: headers (lowercase name, value) and JSON body.
#[derive(Debug, Clone)]
pub struct Captured {
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone)]
pub struct Stub {
    pub status: StatusCode,
    pub response: Value,
    pub captured: Arc<Mutex<Vec<Captured>>>,
}

impl Stub {
    pub fn new(status: StatusCode, response: Value) -> Self {
        Self {
            status,
            response,
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn captured(&self) -> Vec<Captured> {
        self.captured.lock().expect("captured lock").clone()
    }
}

fn capture(headers: &HeaderMap, body: &str) -> Captured {
    Captured {
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect(),
        body: serde_json::from_str(body).unwrap_or(Value::Null),
    }
}

fn json_response(status: StatusCode, body: &Value) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.to_string(),
    )
        .into_response()
}

async fn canned(State(stub): State<Stub>, headers: HeaderMap, body: String) -> Response {
    stub.captured
        .lock()
        .expect("captured lock")
        .push(capture(&headers, &body));
    let mut response = json_response(stub.status, &stub.response);
    response
        .headers_mut()
        .insert("x-amz-geo-pricing-bucket", HeaderValue::from_static("Core"));
    response
}

pub fn routes_router(stub: Stub) -> Router {
    Router::new()
        .route("/v2/routes", post(canned))
        .with_state(stub)
}

pub const GOOD_IDENTITY: &str = "ap-northeast-1:11111111-2222-3333-4444-555555555555";
pub const STALE_IDENTITY: &str = "ap-northeast-1:stale";

/// Cognito stub answering `GetId` and `GetCredentialsForIdentity`.
#[derive(Clone)]
pub struct CognitoStub {
    pub expiration: f64,
    pub fail_with: Option<(StatusCode, Value)>,
    /// Hand out an identity the pool then rejects on the first `GetId`.
    pub stale_first: bool,
    pub get_id_calls: Arc<AtomicUsize>,
    pub captured: Arc<Mutex<Vec<Captured>>>,
}

impl CognitoStub {
    pub fn new(expiration: f64) -> Self {
        Self {
            expiration,
            fail_with: None,
            stale_first: false,
            get_id_calls: Arc::new(AtomicUsize::new(0)),
            captured: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(status: StatusCode, body: Value) -> Self {
        Self {
            fail_with: Some((status, body)),
            ..Self::new(0.0)
        }
    }

    pub fn targets(&self) -> Vec<String> {
        self.captured
            .lock()
            .expect("captured lock")
            .iter()
            .filter_map(|c| c.header("x-amz-target").map(str::to_string))
            .collect()
    }
}

async fn cognito(State(stub): State<CognitoStub>, headers: HeaderMap, body: String) -> Response {
    let captured = capture(&headers, &body);
    let target = captured.header("x-amz-target").unwrap_or_default().to_string();
    let identity_id = captured.body["IdentityId"].as_str().map(str::to_string);
    stub.captured.lock().expect("captured lock").push(captured);

    if let Some((status, body)) = &stub.fail_with {
        return json_response(*status, body);
    }

    let response = match target.as_str() {
        "AWSCognitoIdentityService.GetId" => {
            let calls = stub.get_id_calls.fetch_add(1, Ordering::SeqCst);
            let id = if stub.stale_first && calls == 0 {
                STALE_IDENTITY
            } else {
                GOOD_IDENTITY
            };
            json!({ "IdentityId": id })
        }
        "AWSCognitoIdentityService.GetCredentialsForIdentity" => {
            if identity_id.as_deref() == Some(STALE_IDENTITY) {
                return json_response(
                    StatusCode::BAD_REQUEST,
                    &json!({
                        "__type": "ResourceNotFoundException",
                        "message": format!("Identity '{}' not found.", STALE_IDENTITY)
                    }),
                );
            }
            json!({
                "IdentityId": GOOD_IDENTITY,
                "Credentials": {
                    "AccessKeyId": "ASIATESTKEY",
                    "SecretKey": "test-secret",
                    "SessionToken": "test-session-token",
                    "Expiration": stub.expiration
                }
            })
        }
        _ => {
            return json_response(
                StatusCode::BAD_REQUEST,
                &json!({ "__type": "UnknownOperationException" }),
            )
        }
    };
    json_response(StatusCode::OK, &response)
}

pub fn cognito_router(stub: CognitoStub) -> Router {
    Router::new().route("/", post(cognito)).with_state(stub)
}

/// Identity provider for `pool_id` sent to `base`.
pub async fn identity_provider(pool_id: &str, base: &str) -> CognitoCredentialsProvider {
    let shared = load_shared_config("ap-northeast-1").await;
    CognitoCredentialsProvider::from_shared_config(&shared, pool_id, Some(base))
}

pub fn static_credentials() -> Credentials {
    Credentials::new(
        "ASIATESTKEY",
        "test-secret",
        Some("test-session-token".to_string()),
        None,
        "stub",
    )
}

/// Routes client signing with fixed credentials, sent to `base`.
pub async fn routes_client(base: &str) -> GeoRoutesClient {
    let shared = load_shared_config("ap-northeast-1").await;
    GeoRoutesClient::from_shared_config(&shared, static_credentials(), Some(base))
}
