//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::clients::{http_client, JsonRpcWallet, LensApiClient, ThirdwebStorage};
use crate::config::Config;
use crate::controller::{Collaborators, SubmissionController};
use crate::notify::TracingNotifier;
use crate::pipeline::WalletSession;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub controller: SubmissionController,
    pub start_time: Instant,
}

impl AppState {
    /// Wire the HTTP collaborators described by `config`.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let http = http_client(config.request_timeout_ms)?;

        let storage = Arc::new(ThirdwebStorage::new(
            http.clone(),
            &config.storage_upload_url,
            config.storage_secret_key.clone(),
        ));
        let lens = Arc::new(LensApiClient::new(
            http.clone(),
            &config.lens_api_url,
            config.lens_access_token.clone(),
        ));

        let wallet: Option<Arc<dyn WalletSession>> = match &config.wallet_address {
            Some(address) => {
                info!(address = %address, rpc = %config.wallet_rpc_url, "Wallet session configured");
                Some(Arc::new(JsonRpcWallet::new(http, &config.wallet_rpc_url, address)))
            }
            None => {
                warn!("No wallet address configured; submissions will fail until one is set");
                None
            }
        };

        if config.lens_access_token.is_none() {
            warn!("No Lens access token configured; typed-data requests will be unauthenticated");
        }

        let controller = SubmissionController::new(
            config.app_id.clone(),
            Collaborators {
                storage,
                protocol: lens.clone(),
                relay: lens,
                wallet,
                notifier: Arc::new(TracingNotifier),
            },
        );

        Ok(Self::with_controller(config, controller))
    }

    /// State around an already-wired controller.
    pub fn with_controller(config: Config, controller: SubmissionController) -> Self {
        Self {
            config,
            controller,
            start_time: Instant::now(),
        }
    }
}
