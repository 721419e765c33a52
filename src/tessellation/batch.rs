use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{RegionError, Result};
use crate::math::Point2;
use crate::shape::{Polygon, Properties};

/// A decoded region as handed over by a format reader, already in
/// geographic coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ring: Vec<Point2>,
    pub properties: Properties,
}

/// What to do when one feature of a batch fails to triangulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop at the first failure and return it as the batch error.
    AbortOnFirstError,
    /// Keep going; failures are reported per feature.
    #[default]
    IsolateFailures,
}

/// A feature that could not be turned into a polygon.
#[derive(Debug)]
pub struct FeatureFailure {
    pub name: String,
    pub error: RegionError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Polygons in input order, failed features skipped.
    pub polygons: Vec<Polygon>,
    pub failures: Vec<FeatureFailure>,
}

impl BatchReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Triangulates a batch of decoded features into polygons.
pub struct TriangulateBatch<'a> {
    features: &'a [Feature],
    policy: BatchPolicy,
}

impl<'a> TriangulateBatch<'a> {
    /// Creates a new `TriangulateBatch` operation with the default policy.
    #[must_use]
    pub fn new(features: &'a [Feature]) -> Self {
        Self {
            features,
            policy: BatchPolicy::default(),
        }
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Executes the batch. The input is only read, so running it again on
    /// the same features yields the same report.
    ///
    /// # Errors
    ///
    /// With [`BatchPolicy::AbortOnFirstError`], returns the first feature
    /// error. With [`BatchPolicy::IsolateFailures`] this never fails.
    pub fn execute(&self) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for feature in self.features {
            match build_polygon(feature) {
                Ok(polygon) => report.polygons.push(polygon),
                Err(error) => {
                    warn!(feature = %feature.name, %error, "feature failed to triangulate");
                    if self.policy == BatchPolicy::AbortOnFirstError {
                        return Err(error);
                    }
                    report.failures.push(FeatureFailure {
                        name: feature.name.clone(),
                        error,
                    });
                }
            }
        }

        debug!(
            polygons = report.polygons.len(),
            failures = report.failures.len(),
            "batch triangulated"
        );
        Ok(report)
    }
}

fn build_polygon(feature: &Feature) -> Result<Polygon> {
    Ok(Polygon::new(feature.name.clone(), &feature.ring)?
        .with_id(feature.id.clone())
        .with_description(feature.description.clone())
        .with_properties(feature.properties.clone()))
}
