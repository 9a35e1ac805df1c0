//! Form controller driven end to end through the backend worker.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use async_trait::async_trait;
use axum::{extract::State, routing::post, Json, Router};
use client_core::{
    EmailGenerator, FailureKind, GenerationError, HttpEmailGenerator, GENERIC_FAILURE_MESSAGE,
};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use shared::{domain::EmailType, protocol::GenerateRequest};
use tokio::{
    net::TcpListener,
    runtime::Runtime,
    sync::{oneshot, Mutex},
};
use url::Url;

use crate::backend_bridge::{commands::BackendCommand, runtime::launch};
use crate::controller::{
    events::UiEvent,
    orchestration::dispatch_backend_command,
    reducer::{FormState, ViewState},
};

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
struct MockState {
    captured: Arc<Mutex<Option<oneshot::Sender<serde_json::Value>>>>,
    hits: Arc<AtomicUsize>,
    reply: serde_json::Value,
    delay: Duration,
}

async fn handle_generate(
    State(state): State<MockState>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(tx) = state.captured.lock().await.take() {
        let _ = tx.send(body);
    }
    tokio::time::sleep(state.delay).await;
    Json(state.reply.clone())
}

/// Mock generation service hosted on its own runtime for the duration of a test.
struct MockService {
    _runtime: Runtime,
    endpoint: Url,
    captured: oneshot::Receiver<serde_json::Value>,
    hits: Arc<AtomicUsize>,
}

impl MockService {
    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

fn spawn_mock_service(reply: serde_json::Value, delay: Duration) -> MockService {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let runtime = Runtime::new().expect("server runtime");
    let (tx, captured) = oneshot::channel();
    let hits = Arc::new(AtomicUsize::new(0));
    let state = MockState {
        captured: Arc::new(Mutex::new(Some(tx))),
        hits: hits.clone(),
        reply,
        delay,
    };
    let endpoint = runtime.block_on(async move {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        let app = Router::new()
            .route("/api/generate", post(handle_generate))
            .with_state(state);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Url::parse(&format!("http://{addr}/api/generate")).expect("url")
    });
    MockService {
        _runtime: runtime,
        endpoint,
        captured,
        hits,
    }
}

struct Harness {
    form: FormState,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl Harness {
    fn new(generator: Arc<dyn EmailGenerator>) -> Self {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(64);
        launch(cmd_rx, ui_tx, generator);
        Self {
            form: FormState::default(),
            cmd_tx,
            ui_rx,
        }
    }

    fn generate(&mut self) -> bool {
        let Some(cmd) = self.form.begin_generate() else {
            return false;
        };
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.form.fail_dispatch(err);
        }
        true
    }

    fn settle(&mut self) {
        let event = self.ui_rx.recv_timeout(EVENT_TIMEOUT).expect("ui event");
        self.form.handle_event(event);
    }
}

struct CountingGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl EmailGenerator for CountingGenerator {
    async fn generate(&self, _request: &GenerateRequest) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok("unused".to_string())
    }
}

#[test]
fn apology_email_flows_from_idle_through_loading_to_result() {
    let mut service = spawn_mock_service(
        serde_json::json!({ "email": "Dear customer, ..." }),
        Duration::ZERO,
    );
    let mut harness = Harness::new(Arc::new(HttpEmailGenerator::new(service.endpoint.clone())));

    harness.form.select_type(EmailType::ApologyEmail);
    harness.form.edit_context("delayed shipment");
    assert_eq!(harness.form.view_state(), ViewState::Idle);

    assert!(harness.generate());
    assert_eq!(harness.form.view_state(), ViewState::Loading);

    harness.settle();
    assert_eq!(harness.form.view_state(), ViewState::Result);
    assert_eq!(harness.form.generated_response(), "Dear customer, ...");
    assert_eq!(service.hits(), 1);

    let body = service.captured.try_recv().expect("captured body");
    assert_eq!(
        body,
        serde_json::json!({ "context": "Apology Email: delayed shipment" })
    );
}

#[test]
fn loading_holds_for_the_whole_delayed_request() {
    let delay = Duration::from_millis(400);
    let service = spawn_mock_service(serde_json::json!({ "email": "Hello\nWorld" }), delay);
    let mut harness = Harness::new(Arc::new(HttpEmailGenerator::new(service.endpoint.clone())));
    harness.form.edit_context("follow up on proposal");

    let started = Instant::now();
    assert!(harness.generate());

    while started.elapsed() < delay / 2 {
        match harness.ui_rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            other => panic!("request settled before the mock replied: {other:?}"),
        }
        assert!(harness.form.is_loading());
        assert!(!harness.form.trigger_enabled());
        std::thread::sleep(Duration::from_millis(20));
    }

    harness.settle();
    assert!(started.elapsed() >= delay);
    assert!(!harness.form.is_loading());
    assert_eq!(harness.form.generated_response(), "Hello\nWorld");
    assert_eq!(service.hits(), 1);
}

#[test]
fn unreachable_service_shows_generic_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("free port");
    let endpoint = Url::parse(&format!("http://{addr}/api/generate")).expect("url");
    let mut harness = Harness::new(Arc::new(HttpEmailGenerator::new(endpoint)));
    harness.form.edit_context("anything");

    assert!(harness.generate());
    harness.settle();

    assert_eq!(harness.form.generated_response(), GENERIC_FAILURE_MESSAGE);
    assert_eq!(harness.form.last_failure(), Some(FailureKind::Transport));
    assert!(!harness.form.is_loading());
}

#[test]
fn reply_without_email_shows_generic_failure() {
    let service = spawn_mock_service(serde_json::json!({ "status": "ok" }), Duration::ZERO);
    let mut harness = Harness::new(Arc::new(HttpEmailGenerator::new(service.endpoint.clone())));
    harness.form.edit_context("anything");

    assert!(harness.generate());
    harness.settle();

    assert_eq!(harness.form.generated_response(), "Something went wrong.");
    assert_eq!(harness.form.last_failure(), Some(FailureKind::MissingEmail));
    assert_eq!(service.hits(), 1);
}

#[test]
fn blank_context_never_reaches_the_generator() {
    let generator = Arc::new(CountingGenerator {
        calls: AtomicUsize::new(0),
    });
    let mut harness = Harness::new(generator.clone());
    harness.form.edit_context("   \n");

    assert!(!harness.generate());
    assert!(harness.form.alert().is_some());

    let Harness { cmd_tx, ui_rx, .. } = harness;
    drop(cmd_tx);
    assert!(ui_rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn stopped_worker_does_not_leave_form_loading() {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(1);
    drop(cmd_rx);
    let mut form = FormState::default();
    form.edit_context("anything");

    let cmd = form.begin_generate().expect("command");
    let err = dispatch_backend_command(&cmd_tx, cmd).expect_err("worker gone");
    form.fail_dispatch(err);

    assert!(!form.is_loading());
    assert_eq!(form.generated_response(), GENERIC_FAILURE_MESSAGE);
    assert_eq!(form.last_failure(), Some(FailureKind::WorkerUnavailable));
}
