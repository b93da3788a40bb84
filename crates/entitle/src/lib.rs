//! Facade crate for the entitlement engine.
//! Re-exports the domain model and manager, and aggregates the optional
//! in-tree providers behind feature flags. Keep this crate thin: it composes
//! other crates, it does not implement resolution logic.
//!
//! ## Usage
//! - Add `entitle` with the desired feature flags (`unlock`/`logger`).
//! - Build one [`Manager`](manager::Manager) at your composition root and
//!   hand out clones.

pub use entitle_domain as domain;
pub use entitle_manager as manager;

#[cfg(feature = "logger")]
pub use entitle_logger as logger;

/// Provider registry for runtime introspection.
pub mod providers {
    #[cfg(feature = "unlock")]
    pub use entitle_unlock_provider as unlock;

    /// Build-time enabled in-tree providers (by Cargo feature).
    pub const ENABLED: &[&str] = &[
        #[cfg(feature = "unlock")]
        "unlock",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Commonly used types for consumers of the engine.
pub mod prelude {
    pub use entitle_domain::{
        AuthorizationStatus, Environment, Feature, FeatureIdentifier, Offer, OfferIdentifier,
        Price, Product, ProductIdentifier, Target,
    };
    pub use entitle_manager::{
        Manager, ManagerConfig, ManagerError, ObserverHandle, OffersUpdate, OwnerRef, Provider,
        ProviderError, StatusUpdate, owner_ref,
    };
}
