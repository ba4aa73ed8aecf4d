use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use futures_util::StreamExt;
use serde::Serialize;
use std::{
    cmp::Ordering,
    path::PathBuf,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::time::Instant;
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

use crate::contact::{validate, ContactMessage, DEFAULT_MAX_MESSAGE_CHARS};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_RELAY_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const DEFAULT_RELAY_TIMEOUT_MS: u64 = 8_000;
const DEFAULT_RELAY_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const RELAY_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 60_000);
const CONTACT_MAX_MESSAGE_CHARS_BOUNDS: (usize, usize) = (100, 20_000);
const RELAY_ERROR_BODY_MAX_BYTES: usize = 2_048;
const USER_AGENT: &str = "folio-contact-relay/1.0";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum LogLevel {
    Debug,
    Info,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
        }
    }
}

#[derive(Clone)]
struct RelayCredentials {
    service_id: String,
    template_id: String,
    public_key: String,
}

#[derive(Clone)]
struct RelayRuntimeConfig {
    port: u16,
    static_dir: PathBuf,
    relay_url: Url,
    service_id: Option<String>,
    template_id: Option<String>,
    public_key: Option<String>,
    private_key: Option<String>,
    to_email: Option<String>,
    request_timeout: Duration,
    connect_timeout: Duration,
    max_message_chars: usize,
    log_level: LogLevel,
}

impl RelayRuntimeConfig {
    fn from_env() -> Self {
        let request_timeout_ms = parse_env_with_bounds(
            "EMAIL_RELAY_TIMEOUT_MS",
            DEFAULT_RELAY_TIMEOUT_MS,
            RELAY_TIMEOUT_MS_BOUNDS,
        );
        let max_message_chars = parse_env_with_bounds(
            "CONTACT_MAX_MESSAGE_CHARS",
            DEFAULT_MAX_MESSAGE_CHARS,
            CONTACT_MAX_MESSAGE_CHARS_BOUNDS,
        );
        let relay_url = parse_env_http_url("EMAIL_RELAY_URL").unwrap_or_else(default_relay_url);

        Self {
            port: parse_env_non_empty_string("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            static_dir: parse_env_non_empty_string("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            relay_url,
            service_id: parse_env_non_empty_string("EMAIL_RELAY_SERVICE_ID"),
            template_id: parse_env_non_empty_string("EMAIL_RELAY_TEMPLATE_ID"),
            public_key: parse_env_non_empty_string("EMAIL_RELAY_PUBLIC_KEY"),
            private_key: parse_env_non_empty_string("EMAIL_RELAY_PRIVATE_KEY"),
            to_email: parse_env_non_empty_string("CONTACT_TO_EMAIL"),
            request_timeout: Duration::from_millis(request_timeout_ms),
            connect_timeout: Duration::from_millis(DEFAULT_RELAY_CONNECT_TIMEOUT_MS),
            max_message_chars,
            log_level: parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL),
        }
    }

    fn credentials(&self) -> Option<RelayCredentials> {
        Some(RelayCredentials {
            service_id: self.service_id.clone()?,
            template_id: self.template_id.clone()?,
            public_key: self.public_key.clone()?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<RelayRuntimeConfig>,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    from_name: &'a str,
    from_email: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    to_email: Option<&'a str>,
}

#[derive(Serialize)]
struct RelayRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: TemplateParams<'a>,
}

#[derive(Clone, Serialize)]
struct ContactPayload {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ContactPayload {
    fn delivered() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
        }
    }
}

struct RelayFailure {
    error_class: &'static str,
    status_code: Option<u16>,
    detail: Option<String>,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayRuntimeConfig::from_env();
    let port = config.port;
    let bind_address = format!("0.0.0.0:{port}");
    let client = build_relay_client(&config)?;
    let static_service = ServeDir::new(&config.static_dir)
        .not_found_service(ServeFile::new(config.static_dir.join("index.html")));

    log_event(
        &config,
        LogLevel::Info,
        "server_config",
        serde_json::json!({
            "static_dir": config.static_dir.display().to_string(),
            "relay_host": config.relay_url.host_str().unwrap_or("unknown"),
            "relay_configured": config.credentials().is_some(),
            "log_level": config.log_level.as_str(),
        }),
    );

    let state = AppState {
        config: Arc::new(config),
        client,
    };

    let app = Router::new()
        .route("/api/contact", post(post_contact))
        .fallback_service(static_service)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn post_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ContactMessage>, JsonRejection>,
) -> axum::response::Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);
    let config = state.config.as_ref();

    log_event(
        config,
        LogLevel::Info,
        "contact_request_start",
        serde_json::json!({ "request_id": request_id.as_str() }),
    );

    let message = match body {
        Ok(Json(message)) => message,
        Err(rejection) => {
            log_event(
                config,
                LogLevel::Info,
                "contact_request_failed",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "error_class": "invalid_body",
                    "message": rejection.body_text(),
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ContactPayload::error("invalid request body"),
                &request_id,
            );
        }
    };

    let message = match validate(&message, config.max_message_chars) {
        Ok(message) => message,
        Err(reason) => {
            log_event(
                config,
                LogLevel::Info,
                "contact_request_failed",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "error_class": "validation",
                    "message": reason,
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            return json_response(StatusCode::BAD_REQUEST, ContactPayload::error(reason), &request_id);
        }
    };

    let Some(credentials) = config.credentials() else {
        log_event(
            config,
            LogLevel::Info,
            "contact_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "relay_unconfigured",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ContactPayload::error("contact relay is not configured"),
            &request_id,
        );
    };

    match relay_message(&state.client, config, &credentials, &message, &request_id).await {
        Ok(()) => {
            log_event(
                config,
                LogLevel::Info,
                "contact_request_complete",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "status": StatusCode::OK.as_u16(),
                    "message_chars": message.message.chars().count(),
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            json_response(StatusCode::OK, ContactPayload::delivered(), &request_id)
        }
        Err(failure) => {
            log_event(
                config,
                LogLevel::Info,
                "contact_request_failed",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "error_class": failure.error_class,
                    "upstream_status": failure.status_code,
                    "duration_ms": request_started_at.elapsed().as_millis(),
                }),
            );
            log_event(
                config,
                LogLevel::Debug,
                "contact_relay_detail",
                serde_json::json!({
                    "request_id": request_id.as_str(),
                    "detail": failure.detail,
                }),
            );
            json_response(
                StatusCode::BAD_GATEWAY,
                ContactPayload::error("message could not be delivered"),
                &request_id,
            )
        }
    }
}

fn build_relay_request<'a>(
    config: &'a RelayRuntimeConfig,
    credentials: &'a RelayCredentials,
    message: &'a ContactMessage,
) -> RelayRequest<'a> {
    RelayRequest {
        service_id: &credentials.service_id,
        template_id: &credentials.template_id,
        user_id: &credentials.public_key,
        access_token: config.private_key.as_deref(),
        template_params: TemplateParams {
            from_name: &message.name,
            from_email: &message.email,
            message: &message.message,
            to_email: config.to_email.as_deref(),
        },
    }
}

async fn relay_message(
    client: &reqwest::Client,
    config: &RelayRuntimeConfig,
    credentials: &RelayCredentials,
    message: &ContactMessage,
    request_id: &str,
) -> Result<(), RelayFailure> {
    let response = client
        .post(config.relay_url.clone())
        .header(REQUEST_ID_HEADER, request_id)
        .json(&build_relay_request(config, credentials, message))
        .send()
        .await
        .map_err(|error| RelayFailure {
            error_class: if error.is_timeout() {
                "relay_timeout"
            } else {
                "relay_unreachable"
            },
            status_code: None,
            detail: None,
        })?;

    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let detail = read_limited_body(response, RELAY_ERROR_BODY_MAX_BYTES).await.ok();
    Err(RelayFailure {
        error_class: if status.is_client_error() {
            "relay_rejected"
        } else {
            "relay_failed"
        },
        status_code: Some(status.as_u16()),
        detail,
    })
}

fn build_relay_client(config: &RelayRuntimeConfig) -> Result<reqwest::Client, &'static str> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|_| "failed to prepare relay client")
}

async fn read_limited_body(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<String, &'static str> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(512);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|_| "failed reading response body")?;

        if body.len() + chunk.len() > max_response_bytes {
            let remaining = max_response_bytes.saturating_sub(body.len());
            body.extend_from_slice(&chunk[..remaining]);
            break;
        }

        body.extend_from_slice(&chunk);
    }

    Ok(String::from_utf8_lossy(&body).to_string())
}

fn json_response(status: StatusCode, payload: ContactPayload, request_id: &str) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, Json(payload)).into_response()
}

fn default_relay_url() -> Url {
    Url::parse(DEFAULT_RELAY_URL).expect("default relay URL is valid")
}

fn bounded<T>(raw: Option<String>, default: T, bounds: (T, T)) -> T
where
    T: FromStr + PartialOrd,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value >= bounds.0 && *value <= bounds.1)
        .unwrap_or(default)
}

fn parse_env_with_bounds<T>(name: &str, default: T, bounds: (T, T)) -> T
where
    T: FromStr + PartialOrd,
{
    bounded(std::env::var(name).ok(), default, bounds)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_http_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_env_http_url(name: &str) -> Option<Url> {
    parse_http_url(&parse_env_non_empty_string(name)?)
}

fn parse_log_level(name: &str, default: LogLevel) -> LogLevel {
    match parse_env_non_empty_string(name)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn log_event(config: &RelayRuntimeConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}
