//! Named feature gates evaluated against the runtime descriptor.
//!
//! A plugin lists the features it can offer together with the runtime each
//! one needs, evaluates the list once at process start, and then asks the
//! gate before using a feature.

use serde::{Deserialize, Serialize};

use blockidle_plugin::runtime::{
    Compatibility, CompatibilityRequirement, IncompatibilityReason, RuntimeDescriptor,
};

/// Evaluation result for one named feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureGrant {
    /// Feature name.
    pub feature: String,
    /// Whether the runtime satisfies the feature's requirement.
    pub granted: bool,
    /// Why the feature was not granted; empty when granted.
    pub reasons: Vec<IncompatibilityReason>,
}

/// Ordered set of named features and their runtime requirements.
#[derive(Debug, Clone, Default)]
pub struct FeatureGate {
    features: Vec<(String, CompatibilityRequirement)>,
    grants: Vec<FeatureGrant>,
}

impl FeatureGate {
    /// Creates an empty gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a feature and the runtime it requires.
    pub fn feature(
        mut self,
        name: impl Into<String>,
        requirement: CompatibilityRequirement,
    ) -> Self {
        self.features.push((name.into(), requirement));
        self
    }

    /// Evaluates every declared feature against `runtime`, replacing any
    /// previous evaluation. Returns the grants in declaration order.
    pub fn evaluate(&mut self, runtime: &RuntimeDescriptor) -> &[FeatureGrant] {
        self.grants = self
            .features
            .iter()
            .map(|(name, requirement)| {
                let result = requirement.check(runtime);
                FeatureGrant {
                    feature: name.clone(),
                    granted: result.is_compatible(),
                    reasons: match result {
                        Compatibility::Compatible => Vec::new(),
                        Compatibility::Incompatible { reasons } => reasons,
                    },
                }
            })
            .collect();
        &self.grants
    }

    /// Returns whether `name` was granted by the last evaluation.
    ///
    /// Unknown features and features checked before any evaluation are
    /// reported as not granted.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.grants
            .iter()
            .any(|grant| grant.feature == name && grant.granted)
    }

    /// Grants from the last evaluation.
    pub fn grants(&self) -> &[FeatureGrant] {
        &self.grants
    }
}
