//! The provider plugin contract.

use crate::error::ProviderError;
use async_trait::async_trait;
use entitle_domain::{AuthorizationStatus, Environment, Offer, ProductIdentifier, Target};
use std::fmt;

/// An external source of entitlement facts and/or purchase offers.
///
/// Both capability methods default to abstaining, so a provider may implement
/// either or both. Providers are consulted on every resolution pass, in the
/// order they were added; they are never queried concurrently with their own
/// removal (the sequential task queue enforces that ordering).
///
/// A provider whose backing data changes out-of-band (a receipt arriving, a
/// license file appearing) should call
/// [`Manager::refresh`](crate::Manager::refresh) so observers get re-evaluated.
#[async_trait]
pub trait Provider: fmt::Debug + Send + Sync {
    /// Stable name used for offer attribution and log output.
    fn name(&self) -> &str;

    /// This provider's opinion on whether `target` is authorized in
    /// `environment`. `Ok(None)` abstains, excluding the provider from the
    /// combination for this target.
    async fn entitlement(
        &self,
        target: &Target,
        environment: &Environment,
    ) -> Result<Option<AuthorizationStatus>, ProviderError> {
        let _ = (target, environment);
        Ok(None)
    }

    /// Offers this provider can currently make for `product`. `Ok(None)`
    /// means "no data" (e.g. the store has not answered yet), which is
    /// distinct from `Ok(Some(vec![]))`.
    async fn offers(
        &self,
        product: &ProductIdentifier,
    ) -> Result<Option<Vec<Offer>>, ProviderError> {
        let _ = product;
        Ok(None)
    }
}
