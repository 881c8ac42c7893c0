use std::sync::Arc;

use anyhow::Result;
use crm_core::config::CrmConfig;
use crm_core::store::FileStore;

use crate::woocommerce::WooClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<CrmConfig>,
}

impl AppState {
    pub fn new(config: CrmConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }

    // The store re-reads its file on every call, so a fresh handle per
    // request picks up writes from the CLI
    pub fn store(&self) -> FileStore {
        FileStore::open(self.config.data_path())
    }

    /// Fails when WooCommerce credentials are missing or blank.
    pub fn woo_client(&self) -> Result<WooClient> {
        let creds = self.config.credentials()?;
        WooClient::from_credentials(creds)
    }
}
