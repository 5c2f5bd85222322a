//! HTTP implementations of the pipeline collaborators.

mod lens;
mod thirdweb;
mod wallet;

pub use lens::LensApiClient;
pub use thirdweb::ThirdwebStorage;
pub use wallet::JsonRpcWallet;

use std::time::Duration;

/// Shared reqwest client; the timeout bounds every collaborator call.
pub fn http_client(timeout_ms: u64) -> Result<reqwest::Client, crate::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(|e| crate::Error::Client(format!("Failed to build HTTP client: {e}")))
}
