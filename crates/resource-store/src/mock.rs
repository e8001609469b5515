//! # Mock Client
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running actor. Use it to test code that
//! sits *around* a client, in particular how it behaves when a write fails halfway
//! through a multi-step workflow.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, replies are scripted | Real documents and revisions |
//! | **Error Injection** | Easy (`return_err`) | Needs a specific state |
//! | **Use Case** | Logic around the client | The document hooks themselves |
//!
//! ```rust
//! use resource_store::mock::MockClient;
//! use resource_store::{Document, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Seat { id: u32, revision: u64 }
//! #[derive(Debug)] struct SeatCreate;
//! #[derive(Debug)] struct SeatUpdate;
//! #[derive(Debug)] enum SeatAction {}
//! #[derive(Debug, thiserror::Error)] #[error("seat")] struct SeatError;
//!
//! #[async_trait]
//! impl Document for Seat {
//!     type Id = u32; type Create = SeatCreate; type Update = SeatUpdate;
//!     type Action = SeatAction; type ActionResult = (); type Context = (); type Error = SeatError;
//!     fn from_create_params(id: u32, _: SeatCreate) -> Result<Self, SeatError> { Ok(Self { id, revision: 0 }) }
//!     fn revision(&self) -> u64 { self.revision }
//!     fn set_revision(&mut self, revision: u64) { self.revision = revision; }
//!     async fn on_update(&mut self, _: SeatUpdate, _: &()) -> Result<(), SeatError> { Ok(()) }
//!     async fn handle_action(&mut self, a: SeatAction, _: &()) -> Result<(), SeatError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Seat>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! A request that does not match the next expectation is recorded and its reply
//! channel dropped, so the caller sees [`FrameworkError::ActorDropped`] and
//! [`MockClient::verify`] fails.

use crate::client::ResourceClient;
use crate::entity::Document;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Snapshot};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot, watch};

enum Expectation<T: Document> {
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

struct Script<T: Document> {
    expected: VecDeque<Expectation<T>>,
    mismatches: Vec<String>,
}

type Shared<T> = Arc<Mutex<Script<T>>>;

fn lock<T: Document>(script: &Shared<T>) -> MutexGuard<'_, Script<T>> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

fn reply<R>(
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    response: Result<R, FrameworkError>,
) {
    let _ = respond_to.send(response);
}

/// A scripted client with expectation tracking.
pub struct MockClient<T: Document> {
    client: ResourceClient<T>,
    script: Shared<T>,
    snapshots: watch::Sender<Snapshot<T>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Document> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Document> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let (snapshots, snapshot_rx) = watch::channel(Arc::new(Vec::new()));
        let script: Shared<T> = Arc::new(Mutex::new(Script {
            expected: VecDeque::new(),
            mismatches: Vec::new(),
        }));
        let background = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = lock(&background).expected.pop_front();
                match (request, next) {
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => reply(respond_to, response),
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) if id == want => reply(respond_to, response),
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => reply(respond_to, response),
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) if id == want => reply(respond_to, response),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) if id == want => reply(respond_to, response),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) if id == want => reply(respond_to, response),
                    (request, expected) => {
                        let message = format!(
                            "unexpected {} (next expectation: {})",
                            describe_request(&request),
                            expected.as_ref().map(describe_expectation).unwrap_or("none"),
                        );
                        tracing::warn!(%message, "Mock expectation mismatch");
                        lock(&background).mismatches.push(message);
                        // Record first, then drop the reply channel.
                        drop(request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender, snapshot_rx),
            script,
            snapshots,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Publishes a document set to subscribers, as an actor would after a commit.
    pub fn publish(&self, documents: Vec<T>) {
        self.snapshots.send_replace(Arc::new(documents));
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            script: self.script.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    /// Expects an `update` or `update_if` on `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    /// Expects a `perform_action` or `perform_action_if` on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    /// Panics unless every expectation was consumed and no request was unexpected.
    pub fn verify(&self) {
        let script = lock(&self.script);
        if !script.mismatches.is_empty() {
            panic!("Mock received unexpected requests: {:?}", script.mismatches);
        }
        if !script.expected.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expected.len()
            );
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: Document, R> {
    script: Shared<T>,
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: Document, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(response);
        lock(&self.script).expected.push_back(expectation);
    }
}

fn describe_request<T: Document>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("create {params:?}"),
        ResourceRequest::Get { id, .. } => format!("get {id}"),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, update, .. } => format!("update {id} {update:?}"),
        ResourceRequest::Delete { id, .. } => format!("delete {id}"),
        ResourceRequest::Action { id, action, .. } => format!("action {id} {action:?}"),
    }
}

fn describe_expectation<T: Document>(expectation: &Expectation<T>) -> &'static str {
    match expectation {
        Expectation::Create { .. } => "create",
        Expectation::Get { .. } => "get",
        Expectation::List { .. } => "list",
        Expectation::Update { .. } => "update",
        Expectation::Delete { .. } => "delete",
        Expectation::Action { .. } => "action",
    }
}

/// Creates a client and the raw receiver behind it.
///
/// For tests that want to inspect each request as it arrives (for example to assert
/// on the expected revision a workflow sends) and answer it by hand.
pub fn create_mock_client<T: Document>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, snapshot_rx) = watch::channel(Arc::new(Vec::new()));
    (ResourceClient::new(sender, snapshot_rx), receiver)
}

/// The parts of an Action request, as pulled off the receiver by [`expect_action`].
pub type ActionRequest<T> = (
    <T as Document>::Id,
    <T as Document>::Action,
    Option<u64>,
    oneshot::Sender<Result<<T as Document>::ActionResult, FrameworkError>>,
);

/// Returns the next request if it is an Action.
pub async fn expect_action<T: Document>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<ActionRequest<T>> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            expected_revision,
            respond_to,
        }) => Some((id, action, expected_revision, respond_to)),
        _ => None,
    }
}
