//! Brand-DNA extraction: distills a brand profile from portfolio
//! descriptors.
//!
//! The descriptors come from an upstream vision-analysis step. Descriptors
//! are clustered by dominant aesthetic; the largest cluster supplies the
//! primary aesthetic and its signature elements, the next clusters supply
//! secondary aesthetics.

use std::collections::BTreeMap;

use chrono::Utc;
use tracing::debug;

use crate::domain::clamp::clamp01;
use crate::domain::models::{BrandProfile, PortfolioDescriptor, SignatureElement};

/// Maximum signature elements kept per list.
const MAX_SIGNATURE_ELEMENTS: usize = 5;

/// Maximum secondary aesthetics carried on a profile.
const MAX_SECONDARY_AESTHETICS: usize = 2;

/// Sample-size half-saturation point: confidence from portfolio size alone
/// reaches 0.5 at this many descriptors.
const SAMPLE_SATURATION: f64 = 6.0;

#[derive(Debug, Clone, Default)]
pub struct BrandDnaExtractor;

impl BrandDnaExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a brand profile from a user's portfolio descriptors.
    ///
    /// An empty or attribute-free portfolio yields the neutral profile;
    /// confidence always trends toward zero as the portfolio shrinks.
    pub fn extract(&self, user_id: &str, descriptors: &[PortfolioDescriptor]) -> BrandProfile {
        let clusters = cluster_by_aesthetic(descriptors);
        let Some((primary_aesthetic, dominant)) = clusters.first() else {
            debug!(user_id, "no clusterable descriptors, neutral profile");
            return BrandProfile::neutral(user_id);
        };

        let cluster_size = dominant.len();
        let secondary_aesthetics: Vec<String> = clusters
            .iter()
            .skip(1)
            .take(MAX_SECONDARY_AESTHETICS)
            .map(|(aesthetic, _)| aesthetic.clone())
            .collect();

        let clustered_total: usize = clusters.iter().map(|(_, members)| members.len()).sum();
        let confidence = confidence_score(cluster_size, clustered_total, descriptors.len());

        debug!(
            user_id,
            primary = %primary_aesthetic,
            clusters = clusters.len(),
            confidence,
            "brand profile extracted"
        );

        BrandProfile {
            user_id: user_id.to_string(),
            primary_aesthetic: primary_aesthetic.clone(),
            secondary_aesthetics,
            signature_colors: signature_elements(dominant, |d| &d.colors),
            signature_fabrics: signature_elements(dominant, |d| &d.fabrics),
            signature_construction: signature_elements(dominant, |d| &d.construction),
            confidence,
            updated_at: Utc::now(),
        }
    }
}

/// Group descriptors by dominant aesthetic, largest cluster first.
/// Ties break lexically so extraction is deterministic.
fn cluster_by_aesthetic(
    descriptors: &[PortfolioDescriptor],
) -> Vec<(String, Vec<&PortfolioDescriptor>)> {
    let mut clusters: BTreeMap<String, Vec<&PortfolioDescriptor>> = BTreeMap::new();
    for descriptor in descriptors {
        if let Some(aesthetic) = descriptor.dominant_aesthetic() {
            clusters
                .entry(aesthetic.to_string())
                .or_default()
                .push(descriptor);
        }
    }

    let mut ordered: Vec<(String, Vec<&PortfolioDescriptor>)> = clusters.into_iter().collect();
    ordered.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then_with(|| a.0.cmp(&b.0)));
    ordered
}

/// Signature weight of an element = occurrence count within the cluster
/// divided by cluster size. Weights are independent saliency scores.
fn signature_elements<'a, F>(
    cluster: &[&'a PortfolioDescriptor],
    bucket: F,
) -> Vec<SignatureElement>
where
    F: Fn(&'a PortfolioDescriptor) -> &'a std::collections::BTreeSet<String>,
{
    let cluster_size = cluster.len();
    if cluster_size == 0 {
        return Vec::new();
    }

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &descriptor in cluster {
        for term in bucket(descriptor) {
            *counts.entry(term.as_str()).or_default() += 1;
        }
    }

    let mut elements: Vec<SignatureElement> = counts
        .into_iter()
        .map(|(name, count)| SignatureElement::new(name, count as f64 / cluster_size as f64))
        .collect();
    elements.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    elements.truncate(MAX_SIGNATURE_ELEMENTS);
    elements
}

/// Harmonic combination of cluster purity and a saturating sample-size
/// factor. In [0, 1]; tends to 0 as the portfolio empties.
fn confidence_score(dominant_size: usize, clustered_total: usize, portfolio_size: usize) -> f64 {
    if clustered_total == 0 || portfolio_size == 0 {
        return 0.0;
    }
    let purity = dominant_size as f64 / clustered_total as f64;
    let sample = portfolio_size as f64 / (portfolio_size as f64 + SAMPLE_SATURATION);
    if purity + sample == 0.0 {
        return 0.0;
    }
    clamp01(2.0 * purity * sample / (purity + sample))
}
