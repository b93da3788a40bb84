//! Authorization statuses and observation targets.

use crate::identifiers::{FeatureIdentifier, ProductIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The aggregated answer to "is this target authorized?".
///
/// Variants are ordered so that combining provider opinions is a plain `max`:
/// any grant wins, an expired grant beats an explicit deny for messaging
/// purposes, and a deny beats having no opinion at all. `Unknown` means no
/// provider voiced an opinion, which is distinct from being denied.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// No active provider has an opinion (yet).
    #[default]
    Unknown,
    /// At least one provider explicitly denied, none granted.
    Denied,
    /// A grant existed but has lapsed (e.g. an expired subscription).
    Expired,
    /// At least one active provider attests entitlement.
    Granted,
}

impl AuthorizationStatus {
    /// Whether this status authorizes use right now.
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Combines two provider opinions; any grant wins.
    #[must_use]
    pub fn combined(self, other: Self) -> Self {
        self.max(other)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Denied => "denied",
            Self::Expired => "expired",
            Self::Granted => "granted",
        };
        f.write_str(s)
    }
}

/// A feature or product reference, used as the key type for observer interest
/// sets and update maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Target {
    Feature(FeatureIdentifier),
    Product(ProductIdentifier),
}

impl Target {
    /// The raw identifier string, regardless of target kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Feature(id) => id.as_str(),
            Self::Product(id) => id.as_str(),
        }
    }
}

impl From<FeatureIdentifier> for Target {
    fn from(id: FeatureIdentifier) -> Self {
        Self::Feature(id)
    }
}

impl From<ProductIdentifier> for Target {
    fn from(id: ProductIdentifier) -> Self {
        Self::Product(id)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature(id) => write!(f, "feature:{id}"),
            Self::Product(id) => write!(f, "product:{id}"),
        }
    }
}
