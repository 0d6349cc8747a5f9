use axum::{
    body::Bytes,
    extract::{Path as UrlPath, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use futures_util::StreamExt;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::{
    cmp::Ordering,
    collections::HashMap,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tokio::{sync::RwLock, time::Instant};
use tower_http::services::{ServeDir, ServeFile};
use url::Url;

const DEFAULT_VIDEO_DIR: &str = "videos";
const DEFAULT_VIDEO_MAX_BYTES: usize = 64 * 1024 * 1024;
const DEFAULT_VIDEO_CACHE_MAX_ENTRIES: usize = 12;
const DEFAULT_VIDEO_FETCH_TIMEOUT_MS: u64 = 20_000;
const DEFAULT_VIDEO_CONNECT_TIMEOUT_MS: u64 = 3_000;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const VIDEO_MAX_BYTES_BOUNDS: (usize, usize) = (1_024, 256 * 1024 * 1024);
const VIDEO_CACHE_MAX_ENTRIES_BOUNDS: (usize, usize) = (1, 64);
const VIDEO_FETCH_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 120_000);
const VIDEO_CONNECT_TIMEOUT_MS_BOUNDS: (u64, u64) = (100, 30_000);

const VIDEO_NAME_MAX_LEN: usize = 64;
const VIDEO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
const USER_AGENT: &str = "voidworks-video-proxy/1.0";
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, PartialEq, Eq)]
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
struct VideoRuntimeConfig {
    video_dir: PathBuf,
    origin_url: Option<Url>,
    max_bytes: usize,
    cache_max_entries: usize,
    fetch_timeout: Duration,
    connect_timeout: Duration,
    reload_token: Option<String>,
    log_level: LogLevel,
}

impl VideoRuntimeConfig {
    fn from_env() -> Self {
        let video_dir = parse_env_non_empty_string("VIDEO_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_VIDEO_DIR));
        let origin_url = parse_env_http_url("VIDEO_ORIGIN_URL");
        let max_bytes = parse_env_usize_with_bounds(
            "VIDEO_MAX_BYTES",
            DEFAULT_VIDEO_MAX_BYTES,
            VIDEO_MAX_BYTES_BOUNDS,
        );
        let cache_max_entries = parse_env_usize_with_bounds(
            "VIDEO_CACHE_MAX_ENTRIES",
            DEFAULT_VIDEO_CACHE_MAX_ENTRIES,
            VIDEO_CACHE_MAX_ENTRIES_BOUNDS,
        );
        let fetch_timeout_ms = parse_env_u64_with_bounds(
            "VIDEO_FETCH_TIMEOUT_MS",
            DEFAULT_VIDEO_FETCH_TIMEOUT_MS,
            VIDEO_FETCH_TIMEOUT_MS_BOUNDS,
        );
        let connect_timeout_ms = parse_env_u64_with_bounds(
            "VIDEO_CONNECT_TIMEOUT_MS",
            DEFAULT_VIDEO_CONNECT_TIMEOUT_MS,
            VIDEO_CONNECT_TIMEOUT_MS_BOUNDS,
        );
        let reload_token = parse_env_non_empty_string("VIDEO_RELOAD_TOKEN");
        let log_level = parse_log_level("LOG_LEVEL", DEFAULT_LOG_LEVEL);

        Self {
            video_dir,
            origin_url,
            max_bytes,
            cache_max_entries,
            fetch_timeout: Duration::from_millis(fetch_timeout_ms),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            reload_token,
            log_level,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    videos: Arc<RwLock<HashMap<String, VideoCacheEntry>>>,
    config: VideoRuntimeConfig,
}

#[derive(Clone)]
struct VideoCacheEntry {
    loaded_at: Instant,
    bytes: Bytes,
    source: &'static str,
}

#[derive(Serialize)]
struct ErrorPayload {
    ok: bool,
    error: String,
}

impl ErrorPayload {
    fn new(message: &str) -> Self {
        Self {
            ok: false,
            error: message.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReloadSummary {
    ok: bool,
    discovered: usize,
    loaded: usize,
    failed: usize,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let bind_address = format!("0.0.0.0:{port}");

    let state = AppState {
        videos: Arc::new(RwLock::new(HashMap::new())),
        config: VideoRuntimeConfig::from_env(),
    };

    let static_service = ServeDir::new("dist").not_found_service(ServeFile::new("dist/index.html"));

    let app = Router::new()
        .route("/api/video", get(get_video_missing_name))
        .route("/api/video/{name}", get(get_video))
        .route("/internal/reload-videos", post(reload_videos_endpoint))
        .fallback_service(static_service)
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    println!("server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn get_video_missing_name(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request_id = resolve_request_id(&headers);

    log_event(
        &state.config,
        LogLevel::Info,
        "video_request_failed",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "error_class": "missing_name",
            "message": "no video name provided",
        }),
    );

    json_response(
        StatusCode::BAD_REQUEST,
        ErrorPayload::new("no video name provided"),
        cache_control("no-store"),
        &request_id,
    )
}

async fn get_video(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    UrlPath(name): UrlPath<String>,
) -> impl IntoResponse {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    log_event(
        &state.config,
        LogLevel::Info,
        "video_request_start",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": uri.path(),
            "name": name.as_str(),
        }),
    );

    if name.trim().is_empty() {
        log_event(
            &state.config,
            LogLevel::Info,
            "video_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "missing_name",
                "message": "no video name provided",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::BAD_REQUEST,
            ErrorPayload::new("no video name provided"),
            cache_control("no-store"),
            &request_id,
        );
    }

    if !is_valid_video_name(&name) {
        log_event(
            &state.config,
            LogLevel::Info,
            "video_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "invalid_name",
                "message": "invalid video name",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::BAD_REQUEST,
            ErrorPayload::new("invalid video name"),
            cache_control("no-store"),
            &request_id,
        );
    }

    let cache_hit = read_from_cache(&state, &name).await;
    log_event(
        &state.config,
        LogLevel::Info,
        "video_cache_decision",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "name": name.as_str(),
            "memory_cache": if cache_hit.is_some() { "hit" } else { "miss" },
        }),
    );

    if let Some(entry) = cache_hit {
        log_event(
            &state.config,
            LogLevel::Info,
            "video_request_complete",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "status": StatusCode::OK.as_u16(),
                "duration_ms": request_started_at.elapsed().as_millis(),
                "cache": "memory_hit",
                "source": entry.source,
                "bytes": entry.bytes.len(),
            }),
        );
        return video_response(entry.bytes, &request_id);
    }

    let Some((bytes, source)) = resolve_video_bytes(&state, &name, &request_id).await else {
        log_event(
            &state.config,
            LogLevel::Info,
            "video_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "not_found",
                "message": "video not found",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::NOT_FOUND,
            ErrorPayload::new("video not found"),
            cache_control("no-store"),
            &request_id,
        );
    };

    write_to_cache(&state, name.clone(), bytes.clone(), source).await;

    log_event(
        &state.config,
        LogLevel::Info,
        "video_request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "status": StatusCode::OK.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
            "cache": "memory_miss",
            "source": source,
            "bytes": bytes.len(),
        }),
    );

    video_response(bytes, &request_id)
}

async fn reload_videos_endpoint(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(&headers);

    log_event(
        &state.config,
        LogLevel::Info,
        "reload_request_start",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": uri.path(),
        }),
    );

    if state.config.reload_token.is_none() {
        log_event(
            &state.config,
            LogLevel::Info,
            "reload_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "config_missing",
                "message": "reload token is not configured",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            ErrorPayload::new("reload token is not configured"),
            cache_control("no-store"),
            &request_id,
        );
    }

    if !is_reload_authorized(&headers, &state.config) {
        log_event(
            &state.config,
            LogLevel::Info,
            "reload_request_failed",
            serde_json::json!({
                "request_id": request_id.as_str(),
                "error_class": "auth_failed",
                "message": "unauthorized",
                "duration_ms": request_started_at.elapsed().as_millis(),
            }),
        );
        return json_response(
            StatusCode::UNAUTHORIZED,
            ErrorPayload::new("unauthorized"),
            cache_control("no-store"),
            &request_id,
        );
    }

    let summary = load_videos_from_dir(&state, &request_id).await;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(header::CACHE_CONTROL, cache_control("no-store"));
    response_headers.insert(header::VARY, HeaderValue::from_static("Authorization"));

    log_event(
        &state.config,
        LogLevel::Info,
        "reload_request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "status": StatusCode::OK.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
            "discovered": summary.discovered,
            "loaded": summary.loaded,
            "failed": summary.failed,
        }),
    );

    response_with_request_id(StatusCode::OK, response_headers, Json(summary), &request_id)
}

fn video_response(bytes: Bytes, request_id: &str) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("video/mp4"));
    headers.insert(header::CACHE_CONTROL, cache_control(VIDEO_CACHE_CONTROL));
    response_with_request_id(StatusCode::OK, headers, bytes, request_id)
}

fn json_response(
    status: StatusCode,
    payload: ErrorPayload,
    cache_control: HeaderValue,
    request_id: &str,
) -> axum::response::Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CACHE_CONTROL, cache_control);
    response_with_request_id(status, headers, Json(payload), request_id)
}

fn cache_control(value: &str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static("no-store"))
}

fn response_with_request_id(
    status: StatusCode,
    mut headers: HeaderMap,
    payload: impl IntoResponse,
    request_id: &str,
) -> axum::response::Response {
    if let Ok(request_id_header) = HeaderValue::from_str(request_id) {
        headers.insert(REQUEST_ID_HEADER, request_id_header);
    }
    (status, headers, payload).into_response()
}

fn parse_env_u64_with_bounds(name: &str, default: u64, bounds: (u64, u64)) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_usize_with_bounds(name: &str, default: usize, bounds: (usize, usize)) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_env_non_empty_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env_http_url(name: &str) -> Option<Url> {
    let value = parse_env_non_empty_string(name)?;
    let parsed = Url::parse(&value).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
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

fn log_event(config: &VideoRuntimeConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < config.log_level {
        return;
    }

    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(now_unix_seconds())),
    );
    payload.insert(
        "level".to_string(),
        serde_json::Value::String(level.as_str().to_string()),
    );
    payload.insert(
        "event".to_string(),
        serde_json::Value::String(event.to_string()),
    );

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    println!("{}", serde_json::Value::Object(payload));
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let authorization = headers.get(AUTHORIZATION)?;
    let value = authorization.to_str().ok()?;
    let prefix = "Bearer ";

    if !value.starts_with(prefix) {
        return None;
    }

    Some(value[prefix.len()..].trim())
}

fn is_reload_authorized(headers: &HeaderMap, config: &VideoRuntimeConfig) -> bool {
    let Some(expected_token) = config.reload_token.as_deref() else {
        return false;
    };

    let Some(provided_token) = read_bearer_token(headers) else {
        return false;
    };

    !provided_token.is_empty() && provided_token == expected_token
}

// Short asset names only; the name is joined onto a directory path, so
// anything that could traverse is rejected outright.
fn is_valid_video_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= VIDEO_NAME_MAX_LEN
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

async fn read_from_cache(state: &AppState, name: &str) -> Option<VideoCacheEntry> {
    let cache = state.videos.read().await;
    cache.get(name).cloned()
}

async fn write_to_cache(state: &AppState, name: String, bytes: Bytes, source: &'static str) {
    let mut cache = state.videos.write().await;

    if !cache.contains_key(&name) && cache.len() >= state.config.cache_max_entries {
        evict_oldest_entry(&mut cache);
    }

    cache.insert(
        name,
        VideoCacheEntry {
            loaded_at: Instant::now(),
            bytes,
            source,
        },
    );
}

fn evict_oldest_entry(cache: &mut HashMap<String, VideoCacheEntry>) {
    let Some(key_to_remove) = cache
        .iter()
        .min_by_key(|(_, entry)| entry.loaded_at)
        .map(|(key, _)| key.clone())
    else {
        return;
    };

    cache.remove(&key_to_remove);
}

async fn resolve_video_bytes(
    state: &AppState,
    name: &str,
    request_id: &str,
) -> Option<(Bytes, &'static str)> {
    if let Some(bytes) = load_video_from_dir(&state.config, name).await {
        log_event(
            &state.config,
            LogLevel::Debug,
            "video_source_resolved",
            serde_json::json!({
                "request_id": request_id,
                "name": name,
                "source": "disk",
                "bytes": bytes.len(),
            }),
        );
        return Some((bytes, "disk"));
    }

    if let Some(bytes) = fetch_video_from_origin(&state.config, name, request_id).await {
        log_event(
            &state.config,
            LogLevel::Debug,
            "video_source_resolved",
            serde_json::json!({
                "request_id": request_id,
                "name": name,
                "source": "origin",
                "bytes": bytes.len(),
            }),
        );
        return Some((bytes, "origin"));
    }

    None
}

async fn load_video_from_dir(config: &VideoRuntimeConfig, name: &str) -> Option<Bytes> {
    let path = config.video_dir.join(format!("{name}.mp4"));
    let metadata = tokio::fs::metadata(&path).await.ok()?;

    if !metadata.is_file() || metadata.len() > config.max_bytes as u64 {
        return None;
    }

    tokio::fs::read(&path).await.ok().map(Bytes::from)
}

async fn fetch_video_from_origin(
    config: &VideoRuntimeConfig,
    name: &str,
    request_id: &str,
) -> Option<Bytes> {
    let origin = config.origin_url.as_ref()?;
    let target = origin.join(&format!("{name}.mp4")).ok()?;

    let client = reqwest::Client::builder()
        .timeout(config.fetch_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(USER_AGENT)
        .build()
        .ok()?;

    let response = client.get(target).send().await.ok()?;
    if !response.status().is_success() {
        log_event(
            config,
            LogLevel::Debug,
            "video_origin_fetch_failed",
            serde_json::json!({
                "request_id": request_id,
                "name": name,
                "status": response.status().as_u16(),
            }),
        );
        return None;
    }

    read_limited_bytes(response, config.max_bytes).await.ok()
}

async fn read_limited_bytes(
    response: reqwest::Response,
    max_response_bytes: usize,
) -> Result<Bytes, &'static str> {
    let mut stream = response.bytes_stream();
    let mut body: Vec<u8> = Vec::with_capacity(8192);

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|_| "failed reading response body")?;

        if body.len() + chunk.len() > max_response_bytes {
            return Err("response body too large");
        }

        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}

async fn scan_video_dir(config: &VideoRuntimeConfig) -> Vec<String> {
    let Ok(mut entries) = tokio::fs::read_dir(&config.video_dir).await else {
        return Vec::new();
    };

    let mut names = Vec::new();
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("mp4") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        if is_valid_video_name(stem) {
            names.push(stem.to_string());
        }
    }

    names.sort();
    names
}

async fn load_videos_from_dir(state: &AppState, request_id: &str) -> ReloadSummary {
    let names = scan_video_dir(&state.config).await;
    let discovered = names.len();
    let mut loaded = 0usize;
    let mut failed = 0usize;

    for name in names {
        match load_video_from_dir(&state.config, &name).await {
            Some(bytes) => {
                write_to_cache(state, name, bytes, "reload").await;
                loaded += 1;
            }
            None => {
                log_event(
                    &state.config,
                    LogLevel::Debug,
                    "video_reload_skipped",
                    serde_json::json!({
                        "request_id": request_id,
                        "name": name,
                    }),
                );
                failed += 1;
            }
        }
    }

    ReloadSummary {
        ok: true,
        discovered,
        loaded,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_runtime_config(video_dir: PathBuf) -> VideoRuntimeConfig {
        VideoRuntimeConfig {
            video_dir,
            origin_url: None,
            max_bytes: DEFAULT_VIDEO_MAX_BYTES,
            cache_max_entries: DEFAULT_VIDEO_CACHE_MAX_ENTRIES,
            fetch_timeout: Duration::from_millis(DEFAULT_VIDEO_FETCH_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(DEFAULT_VIDEO_CONNECT_TIMEOUT_MS),
            reload_token: Some("token".to_string()),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }

    fn test_state(config: VideoRuntimeConfig) -> AppState {
        AppState {
            videos: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    #[test]
    fn video_names_accept_short_safe_identifiers() {
        assert!(is_valid_video_name("hero"));
        assert!(is_valid_video_name("bg-1"));
        assert!(is_valid_video_name("clip_02"));
    }

    #[test]
    fn video_names_reject_traversal_and_oversized_input() {
        assert!(!is_valid_video_name(""));
        assert!(!is_valid_video_name("../secrets"));
        assert!(!is_valid_video_name("hero.mp4"));
        assert!(!is_valid_video_name("two words"));
        assert!(!is_valid_video_name(&"a".repeat(VIDEO_NAME_MAX_LEN + 1)));
    }

    #[test]
    fn evict_oldest_entry_removes_first_loaded() {
        let mut cache = HashMap::new();
        let base = Instant::now();

        for index in 0..3u64 {
            cache.insert(
                format!("clip-{index}"),
                VideoCacheEntry {
                    loaded_at: base + Duration::from_secs(index),
                    bytes: Bytes::from_static(b"data"),
                    source: "test",
                },
            );
        }

        evict_oldest_entry(&mut cache);
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key("clip-0"));
        assert!(cache.contains_key("clip-2"));
    }

    #[tokio::test]
    async fn cache_overwrite_at_capacity_does_not_evict_oldest() {
        let state = test_state(test_runtime_config(PathBuf::from("/tmp/missing")));

        {
            let mut cache = state.videos.write().await;
            let base = Instant::now();
            for index in 0..DEFAULT_VIDEO_CACHE_MAX_ENTRIES {
                cache.insert(
                    format!("clip-{index}"),
                    VideoCacheEntry {
                        loaded_at: base + Duration::from_secs(index as u64),
                        bytes: Bytes::from_static(b"old"),
                        source: "test",
                    },
                );
            }
        }

        write_to_cache(&state, "clip-3".to_string(), Bytes::from_static(b"new"), "test").await;

        let cache = state.videos.read().await;
        assert_eq!(cache.len(), DEFAULT_VIDEO_CACHE_MAX_ENTRIES);
        assert!(cache.contains_key("clip-0"));
        assert_eq!(
            cache.get("clip-3").map(|entry| entry.bytes.clone()),
            Some(Bytes::from_static(b"new"))
        );
    }

    #[tokio::test]
    async fn cache_insert_at_capacity_evicts_oldest() {
        let mut config = test_runtime_config(PathBuf::from("/tmp/missing"));
        config.cache_max_entries = 2;
        let state = test_state(config);

        write_to_cache(&state, "first".to_string(), Bytes::from_static(b"a"), "test").await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        write_to_cache(&state, "second".to_string(), Bytes::from_static(b"b"), "test").await;
        tokio::time::sleep(Duration::from_millis(2)).await;
        write_to_cache(&state, "third".to_string(), Bytes::from_static(b"c"), "test").await;

        let cache = state.videos.read().await;
        assert_eq!(cache.len(), 2);
        assert!(!cache.contains_key("first"));
        assert!(cache.contains_key("second"));
        assert!(cache.contains_key("third"));
    }

    #[tokio::test]
    async fn read_from_cache_returns_stored_bytes() {
        let state = test_state(test_runtime_config(PathBuf::from("/tmp/missing")));
        write_to_cache(&state, "hero".to_string(), Bytes::from_static(b"movie"), "test").await;

        assert_eq!(
            read_from_cache(&state, "hero").await.map(|entry| entry.bytes),
            Some(Bytes::from_static(b"movie"))
        );
        assert!(read_from_cache(&state, "unknown").await.is_none());
    }

    #[test]
    fn reload_authorization_requires_matching_bearer_token() {
        let config = test_runtime_config(PathBuf::from("/tmp/missing"));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer token"));
        assert!(is_reload_authorized(&headers, &config));

        let mut wrong = HeaderMap::new();
        wrong.insert(AUTHORIZATION, HeaderValue::from_static("Bearer nope"));
        assert!(!is_reload_authorized(&wrong, &config));

        assert!(!is_reload_authorized(&HeaderMap::new(), &config));

        let mut unconfigured = config.clone();
        unconfigured.reload_token = None;
        assert!(!is_reload_authorized(&headers, &unconfigured));
    }

    #[test]
    fn video_response_carries_immutable_cache_headers() {
        let response = video_response(Bytes::from_static(b"movie"), "req-test");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("video/mp4")
        );
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some(VIDEO_CACHE_CONTROL)
        );
        assert_eq!(
            response
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("req-test")
        );
    }

    #[tokio::test]
    async fn reload_loads_valid_mp4_files_and_skips_oversized_ones() {
        let dir = std::env::temp_dir().join(format!("voidworks-videos-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create temp video dir");
        std::fs::write(dir.join("hero.mp4"), b"tiny clip").expect("write hero");
        std::fs::write(dir.join("huge.mp4"), vec![0u8; 64]).expect("write huge");
        std::fs::write(dir.join("notes.txt"), b"not a video").expect("write notes");

        let mut config = test_runtime_config(dir.clone());
        config.max_bytes = 32;
        let state = test_state(config);

        let summary = load_videos_from_dir(&state, "req-test").await;
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.loaded, 1);
        assert_eq!(summary.failed, 1);

        assert_eq!(
            read_from_cache(&state, "hero").await.map(|entry| entry.bytes),
            Some(Bytes::from(&b"tiny clip"[..]))
        );
        assert!(read_from_cache(&state, "huge").await.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_video_dir_yields_empty_scan() {
        let config = test_runtime_config(PathBuf::from("/tmp/voidworks-does-not-exist"));
        assert!(scan_video_dir(&config).await.is_empty());
    }
}
