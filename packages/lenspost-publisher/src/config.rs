//! Publisher configuration.

use serde::Deserialize;

/// Configuration for the publisher service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application identifier stamped into every metadata record.
    #[serde(default = "defaults::app_id")]
    pub app_id: String,

    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::storage_upload_url")]
    pub storage_upload_url: String,

    #[serde(default)]
    pub storage_secret_key: Option<String>,

    #[serde(default = "defaults::lens_api_url")]
    pub lens_api_url: String,

    #[serde(default)]
    pub lens_access_token: Option<String>,

    #[serde(default = "defaults::wallet_rpc_url")]
    pub wallet_rpc_url: String,

    /// Signing address. Without it no wallet session exists.
    #[serde(default)]
    pub wallet_address: Option<String>,

    /// Applied to every collaborator HTTP call.
    #[serde(default = "defaults::request_timeout_ms")]
    pub request_timeout_ms: u64,

    /// Protects `POST /publications` when set.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_id: defaults::app_id(),
            bind_address: defaults::bind_address(),
            storage_upload_url: defaults::storage_upload_url(),
            storage_secret_key: None,
            lens_api_url: defaults::lens_api_url(),
            lens_access_token: None,
            wallet_rpc_url: defaults::wallet_rpc_url(),
            wallet_address: None,
            request_timeout_ms: defaults::request_timeout_ms(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load `publisher.toml` (optional) overlaid with `PUBLISHER_*` env vars.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from(config::Environment::with_prefix("PUBLISHER"))
    }

    fn load_from(env: config::Environment) -> Result<Self, crate::Error> {
        config::Config::builder()
            .add_source(config::File::with_name("publisher").required(false))
            .add_source(env)
            .build()
            .and_then(|c| c.try_deserialize::<Config>())
            .map(Config::normalized)
            .map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Blank optional values count as unset.
    fn normalized(mut self) -> Self {
        for field in [
            &mut self.storage_secret_key,
            &mut self.lens_access_token,
            &mut self.wallet_address,
            &mut self.api_key,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

mod defaults {
    fn network() -> String {
        std::env::var("PUBLISHER_NETWORK")
            .or_else(|_| std::env::var("LENS_NETWORK"))
            .unwrap_or_else(|_| "testnet".into())
    }

    pub fn app_id() -> String {
        "lenspost".into()
    }

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn storage_upload_url() -> String {
        "https://storage.thirdweb.com/ipfs/upload".into()
    }

    pub fn lens_api_url() -> String {
        if network().contains("mainnet") {
            "https://api-v2.lens.dev".into()
        } else {
            "https://api-v2-mumbai.lens.dev".into()
        }
    }

    pub fn wallet_rpc_url() -> String {
        "http://127.0.0.1:8550".into()
    }

    pub fn request_timeout_ms() -> u64 {
        15_000
    }
}
