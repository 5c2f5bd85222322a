#![allow(dead_code)]

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use lenspost_publisher::pipeline::{ContentStorage, ProtocolClient, RelayClient, WalletSession};
use lenspost_publisher::{
    ClientError, Collaborators, Notification, NotificationSink, SubmissionController,
    SubmissionState,
};
use lenspost_types::{ProtocolError, RelayPayload, Signature, SignedAction, TypedData, UnsignedAction};
use serde_json::{json, Value};
use tokio::sync::watch;

pub const APP_ID: &str = "lenspost-test";

/// Shared call log; also samples the controller state at every collaborator call.
#[derive(Default)]
pub struct Recorder {
    pub calls: Mutex<Vec<String>>,
    pub observed: Mutex<Vec<SubmissionState>>,
    pub uploads: Mutex<Vec<Vec<Value>>>,
    state_rx: OnceLock<watch::Receiver<SubmissionState>>,
}

impl Recorder {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
        if let Some(rx) = self.state_rx.get() {
            self.observed.lock().unwrap().push(*rx.borrow());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn observed(&self) -> Vec<SubmissionState> {
        self.observed.lock().unwrap().clone()
    }
}

struct FakeStorage {
    rec: Arc<Recorder>,
    reply: Result<Vec<String>, ClientError>,
}

#[async_trait]
impl ContentStorage for FakeStorage {
    async fn upload(&self, items: Vec<Value>) -> Result<Vec<String>, ClientError> {
        self.rec.record(format!("upload:{}", items.len()));
        self.rec.uploads.lock().unwrap().push(items);
        // Suspend like a real network call so joined submissions interleave.
        tokio::task::yield_now().await;
        self.reply.clone()
    }
}

struct FakeProtocol {
    rec: Arc<Recorder>,
    reply: Result<UnsignedAction, ProtocolError>,
}

#[async_trait]
impl ProtocolClient for FakeProtocol {
    async fn create_post_typed_data(
        &self,
        content_uri: &str,
    ) -> Result<UnsignedAction, ProtocolError> {
        self.rec.record(format!("create_action:{content_uri}"));
        self.reply.clone()
    }
}

struct FakeWallet {
    rec: Arc<Recorder>,
    reply: Result<Signature, ClientError>,
}

#[async_trait]
impl WalletSession for FakeWallet {
    fn address(&self) -> &str {
        "0x000000000000000000000000000000000000dEaD"
    }

    async fn sign_typed_data(&self, typed_data: &TypedData) -> Result<Signature, ClientError> {
        self.rec.record(format!("sign:{}", typed_data.domain.name));
        self.reply.clone()
    }
}

struct FakeRelay {
    rec: Arc<Recorder>,
    reply: Result<RelayPayload, ProtocolError>,
}

#[async_trait]
impl RelayClient for FakeRelay {
    async fn broadcast_onchain(&self, action: &SignedAction) -> Result<RelayPayload, ProtocolError> {
        self.rec
            .record(format!("broadcast:{}:{}", action.id, action.signature));
        self.reply.clone()
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub fn typed_data() -> TypedData {
    serde_json::from_value(json!({
        "domain": {
            "name": "Lens Protocol Profiles",
            "version": "2",
            "chainId": 80001,
            "verifyingContract": "0x4fbffF20302F3326B20052ab9C217C44F6480900"
        },
        "types": {
            "Post": [
                {"name": "profileId", "type": "uint256"},
                {"name": "contentURI", "type": "string"},
                {"name": "nonce", "type": "uint256"},
                {"name": "deadline", "type": "uint256"}
            ]
        },
        "value": {
            "profileId": "0x01",
            "contentURI": "ipfs://Qm123",
            "nonce": 0,
            "deadline": 1700000000
        }
    }))
    .expect("valid typed data")
}

pub fn relay_success(tx_id: &str) -> RelayPayload {
    RelayPayload(json!({"__typename": "RelaySuccess", "txHash": "0xhash", "txId": tx_id}))
}

/// Builder for a controller wired to deterministic fakes. Defaults to the
/// happy path.
pub struct Harness {
    storage: Result<Vec<String>, ClientError>,
    protocol: Result<UnsignedAction, ProtocolError>,
    wallet: Option<Result<Signature, ClientError>>,
    relay: Result<RelayPayload, ProtocolError>,
}

impl Default for Harness {
    fn default() -> Self {
        Self {
            storage: Ok(vec!["ipfs://Qm123".into()]),
            protocol: Ok(UnsignedAction {
                id: "0x1".into(),
                typed_data: typed_data(),
            }),
            wallet: Some(Ok(Signature("0xsig".into()))),
            relay: Ok(relay_success("0xabc123")),
        }
    }
}

pub struct Wired {
    pub controller: SubmissionController,
    pub rec: Arc<Recorder>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn storage(mut self, reply: Result<Vec<String>, ClientError>) -> Self {
        self.storage = reply;
        self
    }

    pub fn protocol(mut self, reply: Result<UnsignedAction, ProtocolError>) -> Self {
        self.protocol = reply;
        self
    }

    pub fn wallet(mut self, reply: Result<Signature, ClientError>) -> Self {
        self.wallet = Some(reply);
        self
    }

    pub fn without_wallet(mut self) -> Self {
        self.wallet = None;
        self
    }

    pub fn relay(mut self, reply: Result<RelayPayload, ProtocolError>) -> Self {
        self.relay = reply;
        self
    }

    pub fn build(self) -> Wired {
        let rec = Arc::new(Recorder::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let wallet: Option<Arc<dyn WalletSession>> = self.wallet.map(|reply| {
            Arc::new(FakeWallet {
                rec: rec.clone(),
                reply,
            }) as Arc<dyn WalletSession>
        });

        let controller = SubmissionController::new(
            APP_ID,
            Collaborators {
                storage: Arc::new(FakeStorage {
                    rec: rec.clone(),
                    reply: self.storage,
                }),
                protocol: Arc::new(FakeProtocol {
                    rec: rec.clone(),
                    reply: self.protocol,
                }),
                relay: Arc::new(FakeRelay {
                    rec: rec.clone(),
                    reply: self.relay,
                }),
                wallet,
                notifier: notifier.clone(),
            },
        );

        let _ = rec.state_rx.set(controller.subscribe());

        Wired {
            controller,
            rec,
            notifier,
        }
    }
}
