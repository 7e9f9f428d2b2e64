//! Portfolio descriptor model: per-image attributes from upstream vision
//! analysis, consumed by brand-DNA extraction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Attributes observed in one portfolio image.
///
/// The vision step that produces these is outside this crate; descriptors
/// with empty sets are tolerated and simply contribute nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioDescriptor {
    #[serde(default)]
    pub aesthetics: BTreeSet<String>,
    #[serde(default)]
    pub colors: BTreeSet<String>,
    #[serde(default)]
    pub fabrics: BTreeSet<String>,
    #[serde(default)]
    pub construction: BTreeSet<String>,
}

impl PortfolioDescriptor {
    /// The descriptor's dominant aesthetic, used as its cluster key.
    /// Sets are ordered, so ties resolve deterministically.
    pub fn dominant_aesthetic(&self) -> Option<&str> {
        self.aesthetics.iter().next().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.aesthetics.is_empty()
            && self.colors.is_empty()
            && self.fabrics.is_empty()
            && self.construction.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_aesthetic_deterministic() {
        let mut descriptor = PortfolioDescriptor::default();
        descriptor.aesthetics.insert("romantic".to_string());
        descriptor.aesthetics.insert("minimalist".to_string());
        // BTreeSet orders lexically.
        assert_eq!(descriptor.dominant_aesthetic(), Some("minimalist"));
    }

    #[test]
    fn test_empty_descriptor() {
        let descriptor = PortfolioDescriptor::default();
        assert!(descriptor.is_empty());
        assert_eq!(descriptor.dominant_aesthetic(), None);
    }
}
