use entitle_domain::{AuthorizationStatus, Environment, Offer, ProductIdentifier, Target};
use entitle_manager::{Provider, ProviderError};
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

/// A provider scripted from the outside: tests decide which targets it
/// grants, what offers it makes, and whether it fails.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    name: String,
    grants: Mutex<FxHashMap<Target, AuthorizationStatus>>,
    /// `None` means "no offer data at all"; `Some(map)` answers every product
    /// query, with missing keys resolving to zero offers.
    offer_data: Mutex<Option<FxHashMap<ProductIdentifier, Vec<Offer>>>>,
    failing: AtomicBool,
}

impl ScriptedProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn grant(&self, target: Target, status: AuthorizationStatus) {
        self.grants.lock().insert(target, status);
    }

    pub fn revoke(&self, target: &Target) {
        self.grants.lock().remove(target);
    }

    /// Marks the provider as offer-capable, with the given offers per product.
    pub fn set_offers(&self, product: impl Into<ProductIdentifier>, offers: Vec<Offer>) {
        self.offer_data.lock().get_or_insert_with(FxHashMap::default).insert(product.into(), offers);
    }

    /// Marks the provider as offer-capable with zero offers for everything.
    pub fn set_no_offers(&self) {
        self.offer_data.lock().get_or_insert_with(FxHashMap::default);
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entitlement(
        &self,
        target: &Target,
        _environment: &Environment,
    ) -> Result<Option<AuthorizationStatus>, ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable { message: "scripted outage".into() });
        }
        Ok(self.grants.lock().get(target).copied())
    }

    async fn offers(
        &self,
        product: &ProductIdentifier,
    ) -> Result<Option<Vec<Offer>>, ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable { message: "scripted outage".into() });
        }
        Ok(self
            .offer_data
            .lock()
            .as_ref()
            .map(|data| data.get(product).cloned().unwrap_or_default()))
    }
}
