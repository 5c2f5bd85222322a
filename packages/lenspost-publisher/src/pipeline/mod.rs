//! Pipeline steps, leaf-first. Each step wraps one injected collaborator and
//! maps its failures onto a single [`PublishError`](crate::PublishError) kind.

mod action;
mod broadcast;
mod sign;
mod upload;

pub use action::{ProtocolClient, TypedDataRequester};
pub use broadcast::{BroadcastReceipt, Broadcaster, RelayClient};
pub use sign::{Signer, WalletSession};
pub use upload::{ContentStorage, ContentUploader};
