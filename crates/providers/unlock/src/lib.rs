//! # Unlock Provider
//!
//! A provider that grants a configured set of product identifiers
//! unconditionally, optionally restricted to a single environment. This is
//! the shape used for enterprise or site-license deployments where a whole
//! bundle is unlocked without any store interaction.
//!
//! It supplies no offers: there is nothing to buy when everything relevant is
//! already granted.
//!
//! ## Example
//!
//! ```rust
//! use entitle_unlock_provider::UnlockProvider;
//!
//! let provider = UnlockProvider::new(["bundle.pro"]);
//! let scoped = UnlockProvider::new(["bundle.pro"]).for_environment("enterprise-tenant");
//! # let _ = (provider, scoped);
//! ```

use async_trait::async_trait;
use entitle_domain::{AuthorizationStatus, Environment, ProductIdentifier, Target};
use entitle_manager::{Provider, ProviderError};
use serde::{Deserialize, Serialize};

/// Serializable configuration for an [`UnlockProvider`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct UnlockConfig {
    /// Product identifiers granted by this provider.
    pub products: Vec<ProductIdentifier>,
    /// Restricts the grant to one environment identifier; `None` grants in
    /// every environment.
    pub environment: Option<String>,
}

/// Grants a fixed set of products; abstains on everything else.
///
/// Feature coverage follows from the engine's catalog traversal, so this
/// provider only ever voices an opinion on product targets.
#[derive(Debug, Clone)]
pub struct UnlockProvider {
    name: String,
    config: UnlockConfig,
}

impl UnlockProvider {
    /// Creates a provider granting the given product identifiers in every
    /// environment.
    pub fn new<I, P>(products: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<ProductIdentifier>,
    {
        Self::with_config(UnlockConfig {
            products: products.into_iter().map(Into::into).collect(),
            environment: None,
        })
    }

    /// Creates a provider from a deserialized configuration.
    #[must_use]
    pub fn with_config(config: UnlockConfig) -> Self {
        Self { name: "unlock".to_owned(), config }
    }

    /// Overrides the provider name used for logs and attribution.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Restricts the grant to a single environment identifier.
    #[must_use]
    pub fn for_environment(mut self, environment: impl Into<String>) -> Self {
        self.config.environment = Some(environment.into());
        self
    }

    fn applies_to(&self, environment: &Environment) -> bool {
        self.config
            .environment
            .as_ref()
            .is_none_or(|scoped| scoped == &environment.identifier)
    }
}

#[async_trait]
impl Provider for UnlockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entitlement(
        &self,
        target: &Target,
        environment: &Environment,
    ) -> Result<Option<AuthorizationStatus>, ProviderError> {
        if !self.applies_to(environment) {
            return Ok(None);
        }

        match target {
            Target::Product(id) if self.config.products.contains(id) => {
                tracing::trace!(product = %id, provider = self.name, "Unconditional grant");
                Ok(Some(AuthorizationStatus::Granted))
            },
            _ => Ok(None),
        }
    }
}
