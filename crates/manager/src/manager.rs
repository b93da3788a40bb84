//! The manager: public surface tying catalog, providers, queue and observers
//! together.

use crate::catalog::Catalog;
use crate::config::ManagerConfig;
use crate::error::ManagerError;
use crate::observer::{
    ObserverHandle, ObserverKind, ObserverRegistry, OffersUpdate, OwnerRef, StatusUpdate,
};
use crate::provider::Provider;
use crate::queue::SequentialQueue;
use crate::resolve::Resolution;
use entitle_domain::{
    Environment, Feature, FeatureIdentifier, Offer, Product, ProductIdentifier, Target,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::{debug, info};

/// Shared state, exclusively mutated by queue-executed jobs.
#[derive(Debug)]
struct Shared {
    config: ManagerConfig,
    catalog: RwLock<Catalog>,
    providers: RwLock<Vec<Arc<dyn Provider>>>,
    observers: Mutex<ObserverRegistry>,
}

/// The entitlement manager.
///
/// Explicitly constructed (no global instance); clones share the same state
/// and queue. All mutating operations are async and resolve once their queued
/// job has committed. Catalog lookups read an atomic snapshot outside the
/// queue, so a lookup racing a queued registration may still observe the
/// pre-commit catalog.
#[derive(Debug, Clone)]
pub struct Manager {
    shared: Arc<Shared>,
    queue: Arc<SequentialQueue>,
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

impl Manager {
    /// Creates a manager with default configuration.
    ///
    /// Must be called from within a tokio runtime: the sequential queue
    /// worker is spawned here.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ManagerConfig::default())
    }

    /// Creates a manager with explicit configuration.
    #[must_use]
    pub fn with_config(config: ManagerConfig) -> Self {
        let config = config.normalized();
        let queue = Arc::new(SequentialQueue::new(config.queue_capacity));

        info!(name = %config.name, "Entitlement manager started");

        let shared = Arc::new(Shared {
            config,
            catalog: RwLock::new(Catalog::default()),
            providers: RwLock::new(Vec::new()),
            observers: Mutex::new(ObserverRegistry::default()),
        });

        Self { shared, queue }
    }

    /// The configuration this manager runs with.
    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.shared.config
    }

    // --- Feature/product registration ---

    /// Registers a feature. Re-registering an identifier replaces the prior
    /// entry (last-wins).
    pub async fn register_feature(&self, feature: Feature) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        self.queue
            .run(move || async move {
                debug!(feature = %feature.identifier, "Registering feature");
                shared.catalog.write().register_feature(feature);
                evaluate_observers(&shared).await;
            })
            .await
    }

    /// Registers a product. Re-registering an identifier replaces the prior
    /// entry (last-wins).
    pub async fn register_product(&self, product: Product) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        self.queue
            .run(move || async move {
                debug!(product = %product.identifier, "Registering product");
                shared.catalog.write().register_product(product);
                evaluate_observers(&shared).await;
            })
            .await
    }

    // --- Feature/product resolution ---

    /// Returns the feature registered under `identifier`, if any.
    #[must_use]
    pub fn feature_with_identifier(&self, identifier: &FeatureIdentifier) -> Option<Arc<Feature>> {
        self.shared.catalog.read().feature(identifier)
    }

    /// Returns the product registered under `identifier`, if any.
    #[must_use]
    pub fn product_with_identifier(&self, identifier: &ProductIdentifier) -> Option<Arc<Product>> {
        self.shared.catalog.read().product(identifier)
    }

    /// Offers for products containing `feature`, ascending by price with ties
    /// broken by provider insertion order. `Ok(None)` while no provider has
    /// supplied data yet.
    pub async fn offers_for_feature(
        &self,
        feature: &FeatureIdentifier,
    ) -> Result<Option<Vec<Offer>>, ManagerError> {
        let shared = self.shared.clone();
        let feature = feature.clone();
        self.queue
            .run(move || async move {
                let (catalog, providers) = snapshot(&shared);
                Resolution { catalog: &catalog, providers: &providers }
                    .offers_for_feature(&feature)
                    .await
            })
            .await
    }

    /// Offers for `product`, ascending by price with ties broken by provider
    /// insertion order. `Ok(None)` while no provider has supplied data yet.
    pub async fn offers_for_product(
        &self,
        product: &ProductIdentifier,
    ) -> Result<Option<Vec<Offer>>, ManagerError> {
        let shared = self.shared.clone();
        let product = product.clone();
        self.queue
            .run(move || async move {
                let (catalog, providers) = snapshot(&shared);
                Resolution { catalog: &catalog, providers: &providers }
                    .offers_for_product(&product)
                    .await
            })
            .await
    }

    // --- Provider management ---

    /// Adds an entitlement/offer provider. It is consulted on every
    /// subsequent resolution pass until removed.
    pub async fn add_provider(&self, provider: Arc<dyn Provider>) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        self.queue
            .run(move || async move {
                info!(provider = provider.name(), "Provider added");
                shared.providers.write().push(provider);
                evaluate_observers(&shared).await;
            })
            .await
    }

    /// Removes a previously added provider (matched by identity). Removing an
    /// unknown provider is a benign no-op.
    pub async fn remove_provider(&self, provider: &Arc<dyn Provider>) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        let provider = provider.clone();
        self.queue
            .run(move || async move {
                let removed = {
                    let mut providers = shared.providers.write();
                    let before = providers.len();
                    providers.retain(|active| !Arc::ptr_eq(active, &provider));
                    providers.len() < before
                };
                if removed {
                    info!(provider = provider.name(), "Provider removed");
                    evaluate_observers(&shared).await;
                }
            })
            .await
    }

    /// Re-runs resolution over all observers. Providers call this when their
    /// backing data changed out-of-band (a receipt arrived, a license file
    /// appeared).
    pub async fn refresh(&self) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        self.queue.run(move || async move { evaluate_observers(&shared).await }).await
    }

    // --- Observation ---

    /// Starts observing the authorization status of the given products and
    /// features in `environment`.
    ///
    /// The handler is invoked once immediately with the current statuses, and
    /// again whenever a committed change affects the interest set. If `owner`
    /// is given, the observation stops automatically once the owner is
    /// dropped, without a final callback.
    pub async fn observe_products<H>(
        &self,
        products: Vec<ProductIdentifier>,
        features: Vec<FeatureIdentifier>,
        environment: Environment,
        owner: Option<OwnerRef>,
        handler: H,
    ) -> Result<ObserverHandle, ManagerError>
    where
        H: Fn(&StatusUpdate) + Send + Sync + 'static,
    {
        let shared = self.shared.clone();
        let targets = targets_from(products, features);
        self.queue
            .run(move || async move {
                let handle = shared.observers.lock().insert(
                    targets.clone(),
                    Some(environment.clone()),
                    owner,
                    ObserverKind::Status { handler: Arc::new(handler), last_seen: None },
                );

                let (catalog, providers) = snapshot(&shared);
                let resolution = Resolution { catalog: &catalog, providers: &providers };
                let initial = compute_status(&resolution, &targets, &environment).await;

                let staged = shared
                    .observers
                    .lock()
                    .get_mut(&handle)
                    .and_then(|observer| observer.stage_status(&initial));
                // Handlers run without the registry lock held.
                if let Some(deliver) = staged {
                    deliver(&initial);
                }
                handle
            })
            .await
    }

    /// Starts observing the offers covering the given products and features.
    ///
    /// Same lifecycle as [`Manager::observe_products`], with offer-list
    /// updates instead of status updates.
    pub async fn observe_offers<H>(
        &self,
        products: Vec<ProductIdentifier>,
        features: Vec<FeatureIdentifier>,
        owner: Option<OwnerRef>,
        handler: H,
    ) -> Result<ObserverHandle, ManagerError>
    where
        H: Fn(&OffersUpdate) + Send + Sync + 'static,
    {
        let shared = self.shared.clone();
        let targets = targets_from(products, features);
        self.queue
            .run(move || async move {
                let handle = shared.observers.lock().insert(
                    targets.clone(),
                    None,
                    owner,
                    ObserverKind::Offers { handler: Arc::new(handler), last_seen: None },
                );

                let (catalog, providers) = snapshot(&shared);
                let resolution = Resolution { catalog: &catalog, providers: &providers };
                let initial = compute_offers(&resolution, &targets).await;

                let staged = shared
                    .observers
                    .lock()
                    .get_mut(&handle)
                    .and_then(|observer| observer.stage_offers(&initial));
                if let Some(deliver) = staged {
                    deliver(&initial);
                }
                handle
            })
            .await
    }

    /// Stops an observer. Serialized through the queue so it cannot race a
    /// recomputation in flight; stopping an unknown or already-stopped
    /// observer is a no-op.
    pub async fn stop_observer(&self, handle: &ObserverHandle) -> Result<(), ManagerError> {
        let shared = self.shared.clone();
        let handle = handle.clone();
        self.queue
            .run(move || async move {
                shared.observers.lock().remove(&handle);
            })
            .await
    }
}

/// Merges product and feature identifiers into one interest set, products
/// first.
fn targets_from(products: Vec<ProductIdentifier>, features: Vec<FeatureIdentifier>) -> Vec<Target> {
    products
        .into_iter()
        .map(Target::Product)
        .chain(features.into_iter().map(Target::Feature))
        .collect()
}

/// Clones the catalog and provider list so resolution works over a stable
/// view without holding locks across provider I/O.
fn snapshot(shared: &Shared) -> (Catalog, Vec<Arc<dyn Provider>>) {
    (shared.catalog.read().clone(), shared.providers.read().clone())
}

async fn compute_status(
    resolution: &Resolution<'_>,
    targets: &[Target],
    environment: &Environment,
) -> StatusUpdate {
    let mut update = StatusUpdate::default();
    for target in targets {
        update.insert(target.clone(), resolution.status(target, environment).await);
    }
    update
}

async fn compute_offers(resolution: &Resolution<'_>, targets: &[Target]) -> OffersUpdate {
    let mut update = OffersUpdate::default();
    for target in targets {
        let offers = match target {
            Target::Feature(id) => resolution.offers_for_feature(id).await,
            Target::Product(id) => resolution.offers_for_product(id).await,
        };
        update.insert(target.clone(), offers);
    }
    update
}

/// What a registered observer is interested in, captured while the registry
/// lock is held so resolution can run without it.
enum Interest {
    Status { targets: Vec<Target>, environment: Environment },
    Offers { targets: Vec<Target> },
}

/// One evaluation cycle: prune released owners, recompute every observer's
/// view, and deliver updates that differ from the last-seen snapshot.
///
/// Runs at the end of every mutating queued job, after the state change has
/// committed.
async fn evaluate_observers(shared: &Arc<Shared>) {
    let interests: Vec<(ObserverHandle, Interest)> = {
        let mut observers = shared.observers.lock();
        observers.prune_released();
        observers
            .iter_mut()
            .map(|observer| {
                let handle = ObserverHandle { id: observer.id };
                let interest = match (&observer.kind, &observer.environment) {
                    (ObserverKind::Status { .. }, Some(environment)) => Interest::Status {
                        targets: observer.targets.clone(),
                        environment: environment.clone(),
                    },
                    _ => Interest::Offers { targets: observer.targets.clone() },
                };
                (handle, interest)
            })
            .collect()
    };

    if interests.is_empty() {
        return;
    }

    let (catalog, providers) = snapshot(shared);
    let resolution = Resolution { catalog: &catalog, providers: &providers };

    // Handlers are staged under the registry lock and invoked after it is
    // released, so a blocking or re-entrant handler cannot wedge the registry.
    for (handle, interest) in interests {
        match interest {
            Interest::Status { targets, environment } => {
                let fresh = compute_status(&resolution, &targets, &environment).await;
                let staged = shared
                    .observers
                    .lock()
                    .get_mut(&handle)
                    .and_then(|observer| observer.stage_status(&fresh));
                if let Some(deliver) = staged {
                    deliver(&fresh);
                }
            },
            Interest::Offers { targets } => {
                let fresh = compute_offers(&resolution, &targets).await;
                let staged = shared
                    .observers
                    .lock()
                    .get_mut(&handle)
                    .and_then(|observer| observer.stage_offers(&fresh));
                if let Some(deliver) = staged {
                    deliver(&fresh);
                }
            },
        }
    }
}
