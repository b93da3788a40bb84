//! Catalog entries: features and the products bundling them.

use crate::identifiers::{FeatureIdentifier, ProductIdentifier};
use serde::{Deserialize, Serialize};

/// A unit of functionality that can be individually authorized.
///
/// Features are immutable once registered with the catalog; re-registering the
/// same identifier replaces the prior entry wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Feature {
    pub identifier: FeatureIdentifier,
    /// Human-readable name for presentation layers.
    pub name: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Feature {
    /// Creates a feature with a name and no description.
    pub fn new(identifier: impl Into<FeatureIdentifier>, name: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), name: name.into(), description: None }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A purchasable bundle of one or more features.
///
/// Like [`Feature`], products are immutable once registered. The `contents`
/// list references features by identifier only; a product may be registered
/// before its features are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Product {
    pub identifier: ProductIdentifier,
    /// Feature identifiers unlocked by this product.
    pub contents: Vec<FeatureIdentifier>,
    /// Human-readable name for presentation layers.
    pub name: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Product {
    /// Creates a product from its identifier, name and bundled features.
    pub fn new(
        identifier: impl Into<ProductIdentifier>,
        name: impl Into<String>,
        contents: impl IntoIterator<Item = FeatureIdentifier>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            contents: contents.into_iter().collect(),
            name: name.into(),
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Whether this product's contents include the given feature.
    #[must_use]
    pub fn contains(&self, feature: &FeatureIdentifier) -> bool {
        self.contents.contains(feature)
    }
}
