//! NapCat HTTP client.
//!
//! Every call is `POST {base_url}/{endpoint}` with a JSON body. NapCat answers
//! with a OneBot envelope `{"status": "ok" | "failed", "retcode", "message",
//! "wording", "data"}`.

use std::time::Duration;

use async_trait::async_trait;
use ldguard_config::GuardConfig;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum NapcatError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request to NapCat timed out: {url}")]
    Timeout { url: String },

    #[error("request to NapCat failed: {0}")]
    Request(String),

    #[error("NapCat authentication failed (HTTP {status})")]
    Unauthorized { status: u16 },

    #[error("NapCat HTTP error: {status}")]
    Http { status: u16 },

    #[error("NapCat returned a non-JSON response")]
    NonJson,

    #[error("NapCat returned a malformed response")]
    Malformed,

    #[error("NapCat reported failure: status={status}, retcode={retcode}, message={message}")]
    Rejected {
        status: String,
        retcode: String,
        message: String,
        raw: Value,
    },
}

impl NapcatError {
    /// The response body, when NapCat sent a well-formed one.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            NapcatError::Rejected { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// The NapCat control API as the executor sees it.
#[async_trait]
pub trait NapcatApi: Send + Sync {
    /// Call `endpoint` with `payload`; returns the OneBot envelope on `status == "ok"`.
    async fn call(&self, endpoint: &str, payload: &Value) -> Result<Value, NapcatError>;
}

pub struct HttpNapcat {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpNapcat {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NapcatError> {
        // NapCat is a local sidecar; never route it through an env proxy.
        let client = Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| NapcatError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        })
    }

    pub fn from_config(config: &GuardConfig) -> Result<Self, NapcatError> {
        Self::new(
            config.napcat_base_url(),
            config.execution.napcat_token.trim(),
            Duration::from_secs(config.execution.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Check a decoded OneBot envelope.
fn interpret_envelope(raw: Value) -> Result<Value, NapcatError> {
    let Some(obj) = raw.as_object() else {
        return Err(NapcatError::Malformed);
    };
    let status = obj.get("status").and_then(Value::as_str).unwrap_or_default();
    if status == "ok" {
        return Ok(raw);
    }

    let text = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let retcode = match obj.get("retcode") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    let message = text("message")
        .or_else(|| text("wording"))
        .unwrap_or_else(|| "unknown".to_string());
    let status = status.to_string();
    Err(NapcatError::Rejected {
        status,
        retcode,
        message,
        raw,
    })
}

#[async_trait]
impl NapcatApi for HttpNapcat {
    async fn call(&self, endpoint: &str, payload: &Value) -> Result<Value, NapcatError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.post(&url).json(payload);
        if !self.token.is_empty() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        }

        debug!(url = %url, "Calling NapCat");
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                NapcatError::Timeout { url: url.clone() }
            } else {
                NapcatError::Request(e.without_url().to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(url = %url, status = status.as_u16(), "NapCat rejected credentials");
            return Err(NapcatError::Unauthorized { status: status.as_u16() });
        }
        if !status.is_success() {
            return Err(NapcatError::Http { status: status.as_u16() });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| NapcatError::Request(e.without_url().to_string()))?;
        let raw: Value = serde_json::from_slice(&body).map_err(|_| NapcatError::NonJson)?;
        interpret_envelope(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::extract::Path;
    use axum::http::HeaderMap;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    type Seen = Arc<Mutex<Vec<(String, Option<String>, Value)>>>;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn recording_router(seen: Seen, reply: Value) -> Router {
        Router::new().route(
            "/:endpoint",
            post(
                move |Path(endpoint): Path<String>, headers: HeaderMap, Json(body): Json<Value>| {
                    let seen = seen.clone();
                    let reply = reply.clone();
                    async move {
                        let auth = headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        seen.lock().unwrap().push((endpoint, auth, body));
                        Json(reply)
                    }
                },
            ),
        )
    }

    fn client(base_url: &str, token: &str) -> HttpNapcat {
        HttpNapcat::new(base_url, token, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn posts_payload_with_bearer_token() {
        let seen: Seen = Arc::default();
        let ok = json!({"status": "ok", "retcode": 0, "data": null});
        let base = serve(recording_router(seen.clone(), ok.clone())).await;

        let payload = json!({"group_id": "123", "is_dismiss": false});
        let raw = client(&base, "s3cret").call("set_group_leave", &payload).await.unwrap();
        assert_eq!(raw, ok);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, "set_group_leave");
        assert_eq!(seen[0].1.as_deref(), Some("Bearer s3cret"));
        assert_eq!(seen[0].2, payload);
    }

    #[tokio::test]
    async fn empty_token_sends_no_authorization() {
        let seen: Seen = Arc::default();
        let base = serve(recording_router(seen.clone(), json!({"status": "ok"}))).await;

        client(&base, "").call("delete_friend", &json!({"user_id": "42"})).await.unwrap();
        assert_eq!(seen.lock().unwrap()[0].1, None);
    }

    #[tokio::test]
    async fn failed_status_uses_wording_when_message_empty() {
        let seen: Seen = Arc::default();
        let reply = json!({"status": "failed", "retcode": 1200, "message": "", "wording": "not a member"});
        let base = serve(recording_router(seen, reply.clone())).await;

        let err = client(&base, "").call("set_group_leave", &json!({})).await.unwrap_err();
        match &err {
            NapcatError::Rejected { status, retcode, message, .. } => {
                assert_eq!(status, "failed");
                assert_eq!(retcode, "1200");
                assert_eq!(message, "not a member");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.raw(), Some(&reply));
    }

    #[tokio::test]
    async fn unauthorized_is_reported() {
        let router = Router::new().route(
            "/:endpoint",
            post(|| async { axum::http::StatusCode::FORBIDDEN }),
        );
        let base = serve(router).await;
        let err = client(&base, "bad").call("delete_friend", &json!({})).await.unwrap_err();
        assert!(matches!(err, NapcatError::Unauthorized { status: 403 }));
    }

    #[tokio::test]
    async fn server_error_is_http_error() {
        let router = Router::new().route(
            "/:endpoint",
            post(|| async { axum::http::StatusCode::BAD_GATEWAY }),
        );
        let base = serve(router).await;
        let err = client(&base, "").call("delete_friend", &json!({})).await.unwrap_err();
        assert!(matches!(err, NapcatError::Http { status: 502 }));
    }

    #[tokio::test]
    async fn non_json_and_non_object_bodies() {
        let router = Router::new()
            .route("/text", post(|| async { "definitely not json" }))
            .route("/list", post(|| async { Json(json!([1, 2, 3])) }));
        let base = serve(router).await;
        let api = client(&base, "");

        assert!(matches!(api.call("text", &json!({})).await, Err(NapcatError::NonJson)));
        assert!(matches!(api.call("list", &json!({})).await, Err(NapcatError::Malformed)));
    }

    #[tokio::test]
    async fn slow_server_times_out() {
        let router = Router::new().route(
            "/:endpoint",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"status": "ok"}))
            }),
        );
        let base = serve(router).await;
        let api = HttpNapcat::new(&base, "", Duration::from_millis(300)).unwrap();
        let err = api.call("set_group_leave", &json!({})).await.unwrap_err();
        assert!(matches!(err, NapcatError::Timeout { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_request_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(&format!("http://{addr}"), "");
        let err = api.call("delete_friend", &json!({})).await.unwrap_err();
        assert!(matches!(err, NapcatError::Request(_)), "{err:?}");
    }

    #[test]
    fn base_url_from_config() {
        let mut cfg = GuardConfig::default();
        cfg.execution.napcat_host = "napcat".into();
        cfg.execution.napcat_port = 3001;
        let api = HttpNapcat::from_config(&cfg).unwrap();
        assert_eq!(api.base_url(), "http://napcat:3001");
    }
}
