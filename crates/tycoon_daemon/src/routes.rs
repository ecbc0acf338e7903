use crate::state::{AppState, ProfitSample};
use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{
        sse::{Event, Sse},
        Json,
    },
    routing::{get, post},
    Router,
};
use std::convert::Infallible;
use std::sync::atomic::Ordering;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tycoon_control::Action;

#[cfg(test)]
pub fn make_router(state: AppState) -> Router {
    make_router_with_cors(state, "http://localhost:5173")
}

pub fn make_router_with_cors(state: AppState, cors_origin: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<axum::http::HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/meta", get(meta_handler))
        .route("/api/v1/snapshot", get(snapshot_handler))
        .route("/api/v1/history", get(history_handler))
        .route("/api/v1/stream", get(stream_handler))
        .route("/api/v1/action", post(action_handler))
        .route("/api/v1/pause", post(pause_handler))
        .route("/api/v1/resume", post(resume_handler))
        .route("/api/v1/reset", post(reset_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn meta_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let sim = app_state.sim.lock();
    let paused = app_state.paused.load(Ordering::Relaxed);
    Json(serde_json::json!({
        "cycle": sim.business.cycle,
        "tick_ms": app_state.tick_ms,
        "paused": paused,
        "bankrupt": sim.business.is_bankrupt(),
    }))
}

pub async fn snapshot_handler(
    State(app_state): State<AppState>,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let sim = app_state.sim.lock();
    match serde_json::to_string(&sim.business) {
        Ok(json) => {
            drop(sim);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                json,
            )
        }
        Err(err) => {
            tracing::error!("snapshot serialization failed: {err}");
            drop(sim);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error":"serialization failed"}"#.to_string(),
            )
        }
    }
}

pub async fn history_handler(State(app_state): State<AppState>) -> Json<Vec<ProfitSample>> {
    let sim = app_state.sim.lock();
    Json(sim.profit_history.iter().cloned().collect())
}

pub async fn action_handler(
    State(app_state): State<AppState>,
    Json(action): Json<Action>,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut sim = app_state.sim.lock();
    if sim.business.is_bankrupt() {
        return (
            StatusCode::CONFLICT,
            Json(serde_json::json!({"error": "game over, reset to play again"})),
        );
    }
    let state = &mut *sim;
    match tycoon_control::apply_action(&mut state.business, &state.config, &action) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "cycle": state.business.cycle,
                "cash": state.business.cash,
            })),
        ),
        Err(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({"error": err.to_string()})),
        ),
    }
}

pub async fn pause_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    app_state.paused.store(true, Ordering::Relaxed);
    Json(serde_json::json!({"paused": true}))
}

pub async fn resume_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    app_state.paused.store(false, Ordering::Relaxed);
    Json(serde_json::json!({"paused": false}))
}

/// Discard the current game and start fresh with the same config and RNG.
pub async fn reset_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let mut sim = app_state.sim.lock();
    let state = &mut *sim;
    state.business = tycoon_world::initial_state(&state.config, &mut state.rng);
    state.profit_history.clear();
    Json(serde_json::json!({"cycle": 0}))
}

pub async fn stream_handler(
    State(app_state): State<AppState>,
) -> Sse<impl futures_core::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = app_state.alert_tx.subscribe();
    let sim = app_state.sim.clone();

    let stream = async_stream::stream! {
        let mut heartbeat = tokio::time::interval(Duration::from_secs(5));
        heartbeat.tick().await; // discard the immediate first tick
        loop {
            tokio::select! {
                result = rx.recv() => {
                    match result {
                        Ok(alerts) if !alerts.is_empty() => {
                            let data = serde_json::to_string(&alerts).unwrap_or_default();
                            yield Ok(Event::default().data(data));
                        }
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(_)) => {}
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = heartbeat.tick() => {
                    let cycle = sim.lock().business.cycle;
                    let hb = serde_json::json!({"heartbeat": true, "cycle": cycle});
                    yield Ok(Event::default().data(hb.to_string()));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::state::SimState;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use parking_lot::Mutex;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;
    use tycoon_core::test_fixtures::{base_config, base_state};

    fn make_test_state(dir: &tempfile::TempDir) -> AppState {
        let config = base_config();
        let business = base_state(&config);
        AppState {
            sim: Arc::new(Mutex::new(SimState {
                business,
                config,
                rng: ChaCha8Rng::seed_from_u64(0),
                profit_history: VecDeque::new(),
                save_path: dir.path().join("save.json"),
                save_warned: false,
            })),
            alert_tx: tokio::sync::broadcast::channel(64).0,
            paused: Arc::new(AtomicBool::new(false)),
            tick_ms: 2000,
        }
    }

    async fn get_json(state: AppState, uri: &str) -> serde_json::Value {
        let response = make_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn post_json(state: AppState, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = make_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn meta_reports_cycle_and_pause_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        let json = get_json(state, "/api/v1/meta").await;
        assert_eq!(json["cycle"], 0);
        assert_eq!(json["paused"], false);
        assert_eq!(json["bankrupt"], false);
        assert_eq!(json["tick_ms"], 2000);
    }

    #[tokio::test]
    async fn snapshot_is_the_full_business_state() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        let json = get_json(state, "/api/v1/snapshot").await;
        assert_eq!(json["cash"], 1000.0);
        assert_eq!(json["workers"], 1);
        assert!(json["active_event"].is_null());
    }

    #[tokio::test]
    async fn action_applies_and_returns_the_new_cash() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        let (status, json) = post_json(
            state.clone(),
            "/api/v1/action",
            r#"{"action": "hire_worker"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cash"], 750.0);
        assert_eq!(state.sim.lock().business.workers, 2);
    }

    #[tokio::test]
    async fn rejected_action_is_unprocessable() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        let (status, json) = post_json(
            state.clone(),
            "/api/v1/action",
            r#"{"action": "set_price", "price": 999.0}"#,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(json["error"].as_str().unwrap().contains("price"));
        assert_eq!(state.sim.lock().business.price, 15.0);
    }

    #[tokio::test]
    async fn actions_are_refused_after_bankruptcy() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        state.sim.lock().business.cash = -10.0;
        let (status, _) =
            post_json(state, "/api/v1/action", r#"{"action": "hire_worker"}"#).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn pause_and_resume_flip_the_flag() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);

        let (status, json) = post_json(state.clone(), "/api/v1/pause", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["paused"], true);
        assert_eq!(get_json(state.clone(), "/api/v1/meta").await["paused"], true);

        let (_, json) = post_json(state.clone(), "/api/v1/resume", "").await;
        assert_eq!(json["paused"], false);
    }

    #[tokio::test]
    async fn reset_starts_a_fresh_game() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        {
            let mut sim = state.sim.lock();
            sim.business.cycle = 99;
            sim.business.cash = -5.0;
            sim.push_profit_sample();
        }

        let (status, json) = post_json(state.clone(), "/api/v1/reset", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["cycle"], 0);

        let sim = state.sim.lock();
        assert_eq!(sim.business.cycle, 0);
        assert!(!sim.business.is_bankrupt());
        assert!(sim.profit_history.is_empty());
        assert!(sim.business.next_event_cycle.is_some());
    }

    #[tokio::test]
    async fn history_returns_the_recorded_samples() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        assert_eq!(
            get_json(state.clone(), "/api/v1/history").await,
            serde_json::json!([])
        );

        {
            let mut sim = state.sim.lock();
            sim.business.cycle = 1;
            sim.business.profit_per_cycle = 12.5;
            sim.push_profit_sample();
        }
        let json = get_json(state, "/api/v1/history").await;
        assert_eq!(json[0]["cycle"], 1);
        assert_eq!(json[0]["profit"], 12.5);
    }

    #[tokio::test]
    async fn history_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let state = make_test_state(&dir);
        {
            let mut sim = state.sim.lock();
            for cycle in 1..=80 {
                sim.business.cycle = cycle;
                sim.push_profit_sample();
            }
        }
        let json = get_json(state, "/api/v1/history").await;
        let samples = json.as_array().unwrap();
        assert_eq!(samples.len(), crate::state::MAX_PROFIT_HISTORY);
        assert_eq!(samples[0]["cycle"], 31); // oldest surviving sample
        assert_eq!(samples[49]["cycle"], 80);
    }
}
