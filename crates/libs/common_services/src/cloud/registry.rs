use crate::cloud::{GoogleDriveProvider, ProviderError, StorageProvider};
use crate::database::CloudProvider;
use app_state::CloudSettings;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Maps the provider stored on a credential or media row to its
/// implementation.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<CloudProvider, Arc<dyn StorageProvider>>,
}

impl ProviderRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, implementation: Arc<dyn StorageProvider>) {
        self.providers
            .insert(implementation.provider(), implementation);
    }

    #[must_use]
    pub fn get(&self, provider: CloudProvider) -> Option<Arc<dyn StorageProvider>> {
        self.providers.get(&provider).cloned()
    }
}

/// Build the registry with every configured provider.
pub fn build_registry(settings: &CloudSettings) -> Result<ProviderRegistry, ProviderError> {
    let mut registry = ProviderRegistry::new();
    registry.register(Arc::new(GoogleDriveProvider::new(
        settings.google.clone(),
        Duration::from_secs(settings.token_timeout_secs),
        Duration::from_secs(settings.transfer_timeout_secs),
    )?));
    Ok(registry)
}
