//! Design command model.
//!
//! A `DesignCommand` is the parsed form of a user's generation request. The
//! intent/entity parser that produces it lives outside this crate; the engine
//! only requires the shape here and tolerates empty attribute buckets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parsed attribute buckets extracted from a design request.
///
/// Buckets are a closed set of named fields rather than an open string map,
/// so category handling downstream is enforced by the type system. Sets are
/// ordered for deterministic iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBuckets {
    #[serde(default)]
    pub colors: BTreeSet<String>,
    #[serde(default)]
    pub fabrics: BTreeSet<String>,
    #[serde(default)]
    pub styles: BTreeSet<String>,
    #[serde(default)]
    pub construction: BTreeSet<String>,
    #[serde(default)]
    pub occasions: BTreeSet<String>,
}

impl AttributeBuckets {
    /// Count the non-empty descriptor buckets that contribute to specificity.
    ///
    /// Occasions are contextual rather than descriptive and do not count.
    pub fn descriptor_bucket_count(&self) -> usize {
        [
            !self.colors.is_empty(),
            !self.styles.is_empty(),
            !self.fabrics.is_empty(),
            !self.construction.is_empty(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }

    /// All descriptor terms across buckets, lowercased.
    pub fn all_terms(&self) -> impl Iterator<Item = &String> {
        self.colors
            .iter()
            .chain(self.fabrics.iter())
            .chain(self.styles.iter())
            .chain(self.construction.iter())
            .chain(self.occasions.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
            && self.fabrics.is_empty()
            && self.styles.is_empty()
            && self.construction.is_empty()
            && self.occasions.is_empty()
    }
}

/// A parsed design request, created per generation call and discarded after.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DesignCommand {
    /// Raw command text as the user typed it.
    pub raw_text: String,
    /// Requested number of designs.
    pub quantity: u32,
    /// Parsed attribute buckets.
    #[serde(default)]
    pub attributes: AttributeBuckets,
    /// Garment type if the parser identified one (e.g. "dress").
    pub garment_type: Option<String>,
}

impl DesignCommand {
    pub fn new(raw_text: impl Into<String>, quantity: u32) -> Self {
        Self {
            raw_text: raw_text.into(),
            quantity,
            attributes: AttributeBuckets::default(),
            garment_type: None,
        }
    }

    pub fn with_garment_type(mut self, garment_type: impl Into<String>) -> Self {
        self.garment_type = Some(garment_type.into());
        self
    }

    pub fn with_attributes(mut self, attributes: AttributeBuckets) -> Self {
        self.attributes = attributes;
        self
    }

    /// A command is malformed when its raw text is empty or whitespace.
    pub fn is_malformed(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

/// Base garment facts handed to the assembler alongside selected modifiers.
///
/// These are the non-negotiable parts of the prompt: what garment is being
/// generated and how the model should be staged. Modifiers layer on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarmentFacts {
    /// Garment type (e.g. "dress", "blazer"). Empty falls back to "garment".
    pub garment_type: String,
    /// Fit descriptor (e.g. "fitted", "oversized").
    pub fit: Option<String>,
    /// Silhouette descriptor (e.g. "A-line").
    pub silhouette: Option<String>,
    /// Model/pose staging directives (e.g. "full body shot").
    #[serde(default)]
    pub pose_directives: Vec<String>,
}

impl GarmentFacts {
    pub fn new(garment_type: impl Into<String>) -> Self {
        Self {
            garment_type: garment_type.into(),
            fit: None,
            silhouette: None,
            pose_directives: Vec::new(),
        }
    }

    pub fn with_fit(mut self, fit: impl Into<String>) -> Self {
        self.fit = Some(fit.into());
        self
    }

    pub fn with_silhouette(mut self, silhouette: impl Into<String>) -> Self {
        self.silhouette = Some(silhouette.into());
        self
    }

    pub fn with_pose_directive(mut self, directive: impl Into<String>) -> Self {
        self.pose_directives.push(directive.into());
        self
    }

    /// Garment type with a safe fallback so prompts are never empty.
    pub fn garment_type_or_default(&self) -> &str {
        if self.garment_type.trim().is_empty() {
            "garment"
        } else {
            &self.garment_type
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_bucket_count_ignores_occasions() {
        let mut buckets = AttributeBuckets::default();
        buckets.occasions.insert("evening".to_string());
        assert_eq!(buckets.descriptor_bucket_count(), 0);

        buckets.colors.insert("navy".to_string());
        buckets.colors.insert("ivory".to_string());
        assert_eq!(buckets.descriptor_bucket_count(), 1);

        buckets.fabrics.insert("cashmere".to_string());
        buckets.styles.insert("sporty chic".to_string());
        buckets.construction.insert("fitted".to_string());
        assert_eq!(buckets.descriptor_bucket_count(), 4);
    }

    #[test]
    fn test_malformed_command() {
        assert!(DesignCommand::new("", 1).is_malformed());
        assert!(DesignCommand::new("   ", 1).is_malformed());
        assert!(!DesignCommand::new("make me a dress", 1).is_malformed());
    }

    #[test]
    fn test_garment_type_fallback() {
        let facts = GarmentFacts::new("");
        assert_eq!(facts.garment_type_or_default(), "garment");

        let facts = GarmentFacts::new("dress");
        assert_eq!(facts.garment_type_or_default(), "dress");
    }
}
