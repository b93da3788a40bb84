//! The registry of features and products.
//!
//! Only queue-executed tasks mutate the catalog; everything else sees atomic
//! snapshots through the lock in [`Manager`](crate::Manager).

use entitle_domain::{Feature, FeatureIdentifier, Product, ProductIdentifier};
use fxhash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

/// Immutable-after-registration sets of feature and product definitions.
///
/// Duplicate registration policy is last-wins: re-registering an identifier
/// replaces the prior entry wholesale and keeps lookups consistent.
#[derive(Debug, Default, Clone)]
pub(crate) struct Catalog {
    features: FxHashMap<FeatureIdentifier, Arc<Feature>>,
    products: FxHashMap<ProductIdentifier, Arc<Product>>,
    /// Product registration order, for deterministic iteration.
    product_order: Vec<ProductIdentifier>,
}

impl Catalog {
    pub(crate) fn register_feature(&mut self, feature: Feature) {
        let id = feature.identifier.clone();
        if self.features.insert(id.clone(), Arc::new(feature)).is_some() {
            debug!(feature = %id, "Replacing previously registered feature");
        }
    }

    pub(crate) fn register_product(&mut self, product: Product) {
        let id = product.identifier.clone();
        if self.products.insert(id.clone(), Arc::new(product)).is_some() {
            debug!(product = %id, "Replacing previously registered product");
        } else {
            self.product_order.push(id);
        }
    }

    pub(crate) fn feature(&self, id: &FeatureIdentifier) -> Option<Arc<Feature>> {
        self.features.get(id).cloned()
    }

    pub(crate) fn product(&self, id: &ProductIdentifier) -> Option<Arc<Product>> {
        self.products.get(id).cloned()
    }

    /// All registered products whose contents include `feature`, in
    /// registration order.
    pub(crate) fn products_containing(&self, feature: &FeatureIdentifier) -> Vec<Arc<Product>> {
        self.product_order
            .iter()
            .filter_map(|id| self.products.get(id))
            .filter(|product| product.contains(feature))
            .cloned()
            .collect()
    }
}
