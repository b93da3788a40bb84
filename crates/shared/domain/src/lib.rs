//! # Domain Models
//!
//! This crate contains the pure data types of the entitlement engine:
//! identifiers, catalog entries (features and products), offers, environments
//! and authorization statuses. Keep it lean: no I/O, no async, no logic beyond
//! simple helpers—just data with `serde` support.

pub mod catalog;
pub mod environment;
pub mod identifiers;
pub mod offer;
pub mod status;

pub use catalog::{Feature, Product};
pub use environment::Environment;
pub use identifiers::{FeatureIdentifier, OfferIdentifier, ProductIdentifier};
pub use offer::{Offer, Price};
pub use status::{AuthorizationStatus, Target};
