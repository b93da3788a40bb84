//! # Entitlement Manager
//!
//! The resolution and observation engine: it aggregates authorization facts
//! and purchase offers from pluggable [`Provider`]s over a catalog of
//! registered features and products, and notifies observers when the answers
//! change.
//!
//! ## Architecture
//!
//! * **Catalog** — features and products registered once, replaced wholesale
//!   on duplicate identifiers (last-wins).
//! * **Providers** — async sources of entitlement opinions and offers,
//!   consulted on every resolution pass in insertion order.
//! * **Sequential task queue** — a single worker drains all mutations and
//!   resolution passes in submission order, so observers never see a torn
//!   intermediate state.
//! * **Observers** — live subscriptions with an interest set, diffed against
//!   their last-seen snapshot after every committed task; subscriptions whose
//!   weak owner has been dropped are pruned silently.
//!
//! The [`Manager`] is an explicitly constructed instance, not a global: build
//! one at your composition root and hand out clones.
//!
//! ## Example
//!
//! ```rust,no_run
//! use entitle_domain::{Environment, Feature, Product};
//! use entitle_manager::Manager;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), entitle_manager::ManagerError> {
//! let manager = Manager::new();
//!
//! let scanner = Feature::new("document-scanner", "Document Scanner");
//! manager.register_feature(scanner.clone()).await?;
//! manager
//!     .register_product(Product::new("single.document-scanner", "Document Scanner", [
//!         scanner.identifier.clone(),
//!     ]))
//!     .await?;
//!
//! let env = Environment::new("account-1");
//! let observer = manager
//!     .observe_products(
//!         vec!["single.document-scanner".into()],
//!         vec![],
//!         env,
//!         None,
//!         |update| {
//!             for (target, status) in update {
//!                 println!("{target} -> {status}");
//!             }
//!         },
//!     )
//!     .await?;
//! # manager.stop_observer(&observer).await?;
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod error;
mod manager;
mod observer;
mod provider;
mod queue;
mod resolve;

pub use config::ManagerConfig;
pub use error::{ManagerError, ProviderError};
pub use manager::Manager;
pub use observer::{
    ObserverHandle, OffersUpdate, OwnerRef, StatusUpdate, owner_ref,
};
pub use provider::Provider;
