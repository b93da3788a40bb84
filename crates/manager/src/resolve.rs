//! The resolution engine: aggregates provider answers into authorization
//! statuses and price-sorted offer lists.
//!
//! Resolution always runs inside a queued task, over a snapshot of the
//! catalog and the provider list taken when the task started.

use crate::catalog::Catalog;
use crate::provider::Provider;
use entitle_domain::{
    AuthorizationStatus, Environment, FeatureIdentifier, Offer, ProductIdentifier, Target,
};
use std::sync::Arc;
use tracing::warn;

/// The state a single resolution pass works over.
pub(crate) struct Resolution<'a> {
    pub(crate) catalog: &'a Catalog,
    pub(crate) providers: &'a [Arc<dyn Provider>],
}

impl Resolution<'_> {
    /// Aggregated authorization status for a target in an environment.
    ///
    /// Every entitlement-capable provider is asked for its opinion;
    /// abstentions are excluded and the rest combine with "any grant wins".
    /// A product additionally counts as granted when all of its bundled
    /// features are, and a feature inherits grants from any product bundling
    /// it.
    pub(crate) async fn status(&self, target: &Target, environment: &Environment) -> AuthorizationStatus {
        match target {
            Target::Feature(id) => self.feature_status(id, environment).await,
            Target::Product(id) => self.product_status(id, environment).await,
        }
    }

    async fn feature_status(
        &self,
        feature: &FeatureIdentifier,
        environment: &Environment,
    ) -> AuthorizationStatus {
        let mut status = self.direct_status(&Target::Feature(feature.clone()), environment).await;

        // A grant on any product bundling the feature covers the feature.
        for product in self.catalog.products_containing(feature) {
            let via_product = self
                .direct_status(&Target::Product(product.identifier.clone()), environment)
                .await;
            status = status.combined(via_product);
        }

        status
    }

    async fn product_status(
        &self,
        product: &ProductIdentifier,
        environment: &Environment,
    ) -> AuthorizationStatus {
        let mut status = self.direct_status(&Target::Product(product.clone()), environment).await;

        // Holding every bundled feature is equivalent to holding the product.
        if let Some(product) = self.catalog.product(product)
            && !product.contents.is_empty()
        {
            let mut via_features = AuthorizationStatus::Granted;
            for feature in &product.contents {
                let feature_status = self.feature_status(feature, environment).await;
                via_features = via_features.min(feature_status);
            }
            status = status.combined(via_features);
        }

        status
    }

    /// Combines provider opinions on exactly this target, without catalog
    /// traversal.
    async fn direct_status(
        &self,
        target: &Target,
        environment: &Environment,
    ) -> AuthorizationStatus {
        let mut status = AuthorizationStatus::Unknown;

        for provider in self.providers {
            match provider.entitlement(target, environment).await {
                Ok(Some(opinion)) => status = status.combined(opinion),
                Ok(None) => {},
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        %target,
                        error = %err,
                        "Provider failed to answer entitlement query; skipping"
                    );
                },
            }
        }

        status
    }

    /// Offers for a product, ascending by price, stable on provider insertion
    /// order. `None` when no provider supplied data.
    pub(crate) async fn offers_for_product(&self, product: &ProductIdentifier) -> Option<Vec<Offer>> {
        self.collect_offers(std::slice::from_ref(product)).await
    }

    /// Offers covering a feature, transitively via every registered product
    /// that bundles it.
    pub(crate) async fn offers_for_feature(&self, feature: &FeatureIdentifier) -> Option<Vec<Offer>> {
        let products: Vec<ProductIdentifier> = self
            .catalog
            .products_containing(feature)
            .into_iter()
            .map(|product| product.identifier.clone())
            .collect();
        self.collect_offers(&products).await
    }

    /// Unions provider offers over a set of products. Iterates providers in
    /// insertion order so the stable price sort breaks ties the way they were
    /// added.
    async fn collect_offers(&self, products: &[ProductIdentifier]) -> Option<Vec<Offer>> {
        let mut any_data = false;
        let mut offers: Vec<Offer> = Vec::new();

        for provider in self.providers {
            for product in products {
                match provider.offers(product).await {
                    Ok(Some(batch)) => {
                        any_data = true;
                        for offer in batch {
                            // The same offer may cover several queried products.
                            // Identifiers are only unique within one provider,
                            // so dedup keys on the source as well.
                            if !offers.iter().any(|seen| {
                                seen.source == offer.source && seen.identifier == offer.identifier
                            }) {
                                offers.push(offer);
                            }
                        }
                    },
                    Ok(None) => {},
                    Err(err) => {
                        warn!(
                            provider = provider.name(),
                            %product,
                            error = %err,
                            "Provider failed to answer offer query; skipping"
                        );
                    },
                }
            }
        }

        if !any_data {
            return None;
        }

        // Stable: equal prices keep provider insertion order.
        offers.sort_by(|a, b| a.price.cmp(&b.price));
        Some(offers)
    }
}
