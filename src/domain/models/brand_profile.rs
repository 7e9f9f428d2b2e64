//! Brand profile model: a user's distilled design signature.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::clamp::clamp01;
use crate::domain::models::TagCategory;

/// One signature element (a color, fabric, or construction detail) with its
/// saliency weight. Weights are independent scores in (0, 1]; they need not
/// sum to 1 across a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureElement {
    pub name: String,
    pub weight: f64,
}

impl SignatureElement {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight: weight.clamp(f64::EPSILON, 1.0),
        }
    }
}

/// A user's brand signature, rebuilt periodically from portfolio analysis.
///
/// Read-only to the generation path. A missing profile is replaced by
/// [`BrandProfile::neutral`], never treated as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandProfile {
    pub user_id: String,
    pub primary_aesthetic: String,
    /// Up to five secondary aesthetics, strongest first.
    #[serde(default)]
    pub secondary_aesthetics: Vec<String>,
    #[serde(default)]
    pub signature_colors: Vec<SignatureElement>,
    #[serde(default)]
    pub signature_fabrics: Vec<SignatureElement>,
    #[serde(default)]
    pub signature_construction: Vec<SignatureElement>,
    /// Confidence in the profile, in [0, 1]. Zero means "no signal".
    pub confidence: f64,
    pub updated_at: DateTime<Utc>,
}

impl BrandProfile {
    /// Cold-start profile: no aesthetic, zero confidence.
    pub fn neutral(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            primary_aesthetic: String::new(),
            secondary_aesthetics: Vec::new(),
            signature_colors: Vec::new(),
            signature_fabrics: Vec::new(),
            signature_construction: Vec::new(),
            confidence: 0.0,
            updated_at: Utc::now(),
        }
    }

    /// Whether the profile is older than the refresh horizon.
    pub fn is_stale(&self, horizon: Duration, now: DateTime<Utc>) -> bool {
        now - self.updated_at > horizon
    }

    /// Signature weight for a modifier, if it matches the profile.
    ///
    /// Aesthetic modifiers match the primary aesthetic at full weight and
    /// secondary aesthetics at a position-discounted weight. Color, fabric,
    /// and construction modifiers match their signature lists by name
    /// (case-insensitive substring in either direction, so "navy" matches
    /// "navy blue"). Everything else has no brand signal.
    pub fn signature_weight(&self, category: TagCategory, name: &str) -> Option<f64> {
        let needle = name.to_lowercase();
        match category {
            TagCategory::Aesthetic => {
                if !self.primary_aesthetic.is_empty()
                    && names_match(&self.primary_aesthetic.to_lowercase(), &needle)
                {
                    return Some(1.0);
                }
                self.secondary_aesthetics
                    .iter()
                    .position(|a| names_match(&a.to_lowercase(), &needle))
                    .map(|idx| 0.6 / (idx as f64 + 1.0))
            }
            TagCategory::Color => lookup(&self.signature_colors, &needle),
            TagCategory::Fabric => lookup(&self.signature_fabrics, &needle),
            TagCategory::Construction => lookup(&self.signature_construction, &needle),
            TagCategory::Lighting | TagCategory::Background | TagCategory::Other => None,
        }
    }

    /// Brand bias for a modifier: confidence-scaled signature weight.
    pub fn bias_for(&self, category: TagCategory, name: &str) -> f64 {
        self.signature_weight(category, name)
            .map(|w| clamp01(self.confidence) * w)
            .unwrap_or(0.0)
    }

    pub fn has_signal(&self) -> bool {
        self.confidence > 0.0 && !self.primary_aesthetic.is_empty()
    }
}

fn lookup(elements: &[SignatureElement], needle: &str) -> Option<f64> {
    elements
        .iter()
        .find(|e| names_match(&e.name.to_lowercase(), needle))
        .map(|e| e.weight)
}

fn names_match(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> BrandProfile {
        BrandProfile {
            user_id: "user-1".to_string(),
            primary_aesthetic: "minimalist".to_string(),
            secondary_aesthetics: vec!["sporty chic".to_string(), "romantic".to_string()],
            signature_colors: vec![SignatureElement::new("navy blue", 0.8)],
            signature_fabrics: vec![SignatureElement::new("cashmere", 0.6)],
            signature_construction: vec![SignatureElement::new("ribbed cuffs", 0.4)],
            confidence: 0.75,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_neutral_profile_has_no_signal() {
        let neutral = BrandProfile::neutral("user-1");
        assert_eq!(neutral.confidence, 0.0);
        assert!(!neutral.has_signal());
        assert_eq!(neutral.bias_for(TagCategory::Color, "navy"), 0.0);
    }

    #[test]
    fn test_primary_aesthetic_full_weight() {
        let p = profile();
        assert_eq!(
            p.signature_weight(TagCategory::Aesthetic, "minimalist"),
            Some(1.0)
        );
        assert!((p.bias_for(TagCategory::Aesthetic, "minimalist") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_secondary_aesthetic_discounted() {
        let p = profile();
        let first = p
            .signature_weight(TagCategory::Aesthetic, "sporty chic")
            .unwrap();
        let second = p.signature_weight(TagCategory::Aesthetic, "romantic").unwrap();
        assert!(first > second);
        assert!(first < 1.0);
    }

    #[test]
    fn test_color_substring_match() {
        let p = profile();
        assert_eq!(p.signature_weight(TagCategory::Color, "navy"), Some(0.8));
        assert_eq!(p.signature_weight(TagCategory::Color, "crimson"), None);
    }

    #[test]
    fn test_lighting_never_matches() {
        let p = profile();
        assert_eq!(p.signature_weight(TagCategory::Lighting, "minimalist"), None);
    }

    #[test]
    fn test_staleness() {
        let mut p = profile();
        p.updated_at = Utc::now() - Duration::days(45);
        assert!(p.is_stale(Duration::days(30), Utc::now()));
        assert!(!p.is_stale(Duration::days(60), Utc::now()));
    }
}
