//! String-backed identifier newtypes.
//!
//! Identifiers are `Arc<str>` internally so they can be cloned freely across
//! observer interest sets, update maps and provider answers without
//! reallocating.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(Arc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Arc::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier! {
    /// Uniquely identifies a [`Feature`](crate::Feature) within the catalog.
    FeatureIdentifier
}

identifier! {
    /// Uniquely identifies a [`Product`](crate::Product) within the catalog.
    ProductIdentifier
}

identifier! {
    /// Uniquely identifies an [`Offer`](crate::Offer) among a provider's offers.
    OfferIdentifier
}
