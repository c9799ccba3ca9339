//! HTTP-level tests driving the real timer loop on a paused clock

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use countdown_timer::{
    api::create_router,
    cue::{AudioCue, CueError, CueParams, CueProvider},
    input::{PresetList, SecondsSelector},
    state::AppState,
    tasks::spawn_timer_loop,
};

struct CountingCue(Arc<AtomicUsize>);

impl AudioCue for CountingCue {
    fn play_finish_cue(&mut self, _params: &CueParams) -> Result<(), CueError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

struct CountingProvider(Arc<AtomicUsize>);

impl CueProvider for CountingProvider {
    fn acquire(&self) -> Result<Box<dyn AudioCue>, CueError> {
        Ok(Box::new(CountingCue(Arc::clone(&self.0))))
    }
}

fn app(initial_ms: u64) -> (Router, Arc<AtomicUsize>) {
    let plays = Arc::new(AtomicUsize::new(0));
    let timer = spawn_timer_loop(initial_ms, Arc::new(CountingProvider(Arc::clone(&plays))));
    let state = AppState::new(
        0,
        "127.0.0.1".to_string(),
        timer,
        PresetList::default(),
        SecondsSelector::new(600),
    );
    (create_router(Arc::new(state)), plays)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn status(app: &Router) -> Value {
    let (code, body) = call(app, "GET", "/status", None).await;
    assert_eq!(code, StatusCode::OK);
    body["timer"].clone()
}

#[tokio::test(start_paused = true)]
async fn initial_readout_is_three_minutes() {
    let (app, _) = app(180_000);
    let timer = status(&app).await;
    assert_eq!(timer["display"], "3:00");
    assert_eq!(timer["state"], "idle");
    assert_eq!(timer["running"], false);
    assert_eq!(timer["cue_ready"], true);
}

#[tokio::test(start_paused = true)]
async fn countdown_runs_to_finish_and_cues_once() {
    let (app, plays) = app(180_000);

    let (code, body) = call(&app, "POST", "/duration", Some(json!({ "seconds": 5 }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "0:05");

    let (code, body) = call(&app, "POST", "/start", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["running"], true);

    tokio::time::sleep(Duration::from_millis(2_050)).await;
    let timer = status(&app).await;
    assert_eq!(timer["remaining_ms"], 3_000);
    assert_eq!(timer["display"], "0:03");

    tokio::time::sleep(Duration::from_millis(5_000)).await;
    let timer = status(&app).await;
    assert_eq!(timer["state"], "finished");
    assert_eq!(timer["display"], "0:00");
    assert_eq!(timer["running"], false);
    assert_eq!(plays.load(Ordering::SeqCst), 1);

    // Finished is terminal until the next configure.
    let (_, body) = call(&app, "POST", "/start", None).await;
    assert_eq!(body["timer"]["state"], "finished");
    assert_eq!(plays.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_freezes_remaining_time() {
    let (app, plays) = app(1_000);

    call(&app, "POST", "/start", None).await;
    tokio::time::sleep(Duration::from_millis(350)).await;

    let (_, body) = call(&app, "POST", "/stop", None).await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["timer"]["remaining_ms"], 700);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let timer = status(&app).await;
    assert_eq!(timer["state"], "idle");
    assert_eq!(timer["remaining_ms"], 700);
    assert_eq!(plays.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn toggle_acts_as_play_stop_button() {
    let (app, _) = app(60_000);

    let (_, body) = call(&app, "POST", "/toggle", None).await;
    assert_eq!(body["timer"]["running"], true);

    let (_, body) = call(&app, "POST", "/toggle", None).await;
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["timer"]["state"], "idle");
}

#[tokio::test(start_paused = true)]
async fn reconfigure_mid_run_cancels_it() {
    let (app, plays) = app(1_000);

    call(&app, "POST", "/start", None).await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    let (code, body) = call(&app, "POST", "/duration", Some(json!({ "preset": "0:02" }))).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["timer"]["state"], "idle");
    assert_eq!(body["timer"]["remaining_ms"], 2_000);
    assert_eq!(body["timer"]["total_ms"], 2_000);

    tokio::time::sleep(Duration::from_secs(3)).await;
    let timer = status(&app).await;
    assert_eq!(timer["state"], "idle");
    assert_eq!(timer["remaining_ms"], 2_000);
    assert_eq!(plays.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn preset_selection() {
    let (app, _) = app(180_000);

    let (code, body) = call(&app, "GET", "/presets", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["presets"], json!(["1:00", "3:00", "5:00", "10:00"]));
    assert_eq!(body["max_seconds"], 600);

    let (code, body) = call(&app, "POST", "/preset/0", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "1:00");

    let (code, body) = call(&app, "POST", "/preset/9", None).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(status(&app).await["display"], "1:00");
}

#[tokio::test(start_paused = true)]
async fn invalid_durations_never_reach_the_timer() {
    let (app, _) = app(180_000);

    let (code, _) = call(&app, "POST", "/duration", Some(json!({ "preset": "3-00" }))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let (code, _) = call(&app, "POST", "/duration", Some(json!({ "seconds": 601 }))).await;
    assert_eq!(code, StatusCode::BAD_REQUEST);

    let timer = status(&app).await;
    assert_eq!(timer["display"], "3:00");
    assert_eq!(timer["total_ms"], 180_000);
}

#[tokio::test(start_paused = true)]
async fn zero_duration_finishes_immediately() {
    let (app, plays) = app(180_000);

    call(&app, "POST", "/duration", Some(json!({ "seconds": 0 }))).await;
    let (_, body) = call(&app, "POST", "/start", None).await;
    assert_eq!(body["timer"]["state"], "finished");
    assert_eq!(plays.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn paused_screen_finishes_silently() {
    let (app, plays) = app(180_000);

    let (_, body) = call(&app, "POST", "/pause", None).await;
    assert_eq!(body["timer"]["cue_ready"], false);

    call(&app, "POST", "/duration", Some(json!({ "seconds": 1 }))).await;
    call(&app, "POST", "/start", None).await;
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    let timer = status(&app).await;
    assert_eq!(timer["state"], "finished");
    assert_eq!(plays.load(Ordering::SeqCst), 0);

    let (_, body) = call(&app, "POST", "/resume", None).await;
    assert_eq!(body["timer"]["cue_ready"], true);
}

#[tokio::test]
async fn health() {
    let (app, _) = app(180_000);
    let (code, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
