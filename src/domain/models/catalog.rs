//! Modifier catalog: the candidate pool the bandit selects from.

use serde::{Deserialize, Serialize};

use crate::domain::models::{AttributeBuckets, TagCategory};

/// One catalog entry: a stable tag id plus the prompt text it emits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTag {
    pub tag_id: String,
    pub label: String,
    pub category: TagCategory,
}

impl CatalogTag {
    pub fn new(
        tag_id: impl Into<String>,
        label: impl Into<String>,
        category: TagCategory,
    ) -> Self {
        Self {
            tag_id: tag_id.into(),
            label: label.into(),
            category,
        }
    }
}

/// Curated catalog of candidate modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierCatalog {
    tags: Vec<CatalogTag>,
}

impl ModifierCatalog {
    pub fn new(tags: Vec<CatalogTag>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &[CatalogTag] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn get(&self, tag_id: &str) -> Option<&CatalogTag> {
        self.tags.iter().find(|t| t.tag_id == tag_id)
    }

    /// Add a tag, replacing any existing entry with the same id.
    pub fn upsert(&mut self, tag: CatalogTag) {
        self.tags.retain(|t| t.tag_id != tag.tag_id);
        self.tags.push(tag);
    }

    /// Candidate set for one request.
    ///
    /// Every catalog tag is a candidate; attributes the user asked for
    /// explicitly are promoted into the pool as ad hoc candidates so the
    /// bandit can learn about them too (first observation creates their
    /// belief state lazily at the uniform prior).
    pub fn candidates_for(&self, attributes: &AttributeBuckets) -> Vec<CatalogTag> {
        let mut candidates = self.tags.clone();
        let requested = [
            (&attributes.colors, TagCategory::Color),
            (&attributes.fabrics, TagCategory::Fabric),
            (&attributes.styles, TagCategory::Aesthetic),
            (&attributes.construction, TagCategory::Construction),
        ];
        for (bucket, category) in requested {
            for term in bucket {
                let tag_id = slugify(term);
                if candidates.iter().all(|t| t.tag_id != tag_id) {
                    candidates.push(CatalogTag::new(tag_id, term.clone(), category));
                }
            }
        }
        candidates
    }
}

impl Default for ModifierCatalog {
    /// The shipped catalog. Intentionally small per category: the diversity
    /// cap during selection keeps prompts from drowning in any one category,
    /// and feedback decides which of these earn their place per user.
    fn default() -> Self {
        let t = CatalogTag::new;
        Self::new(vec![
            // Aesthetics
            t("minimalist-aesthetic", "minimalist aesthetic", TagCategory::Aesthetic),
            t("sophisticated-aesthetic", "sophisticated aesthetic", TagCategory::Aesthetic),
            t("sporty-chic-aesthetic", "sporty chic aesthetic", TagCategory::Aesthetic),
            t("romantic-aesthetic", "romantic aesthetic", TagCategory::Aesthetic),
            t("avant-garde-aesthetic", "avant-garde aesthetic", TagCategory::Aesthetic),
            t("streetwear-aesthetic", "streetwear aesthetic", TagCategory::Aesthetic),
            // Colors
            t("navy-blue", "navy blue", TagCategory::Color),
            t("ivory", "ivory", TagCategory::Color),
            t("charcoal", "charcoal", TagCategory::Color),
            t("emerald-green", "emerald green", TagCategory::Color),
            t("blush-pink", "blush pink", TagCategory::Color),
            // Fabrics
            t("cashmere", "cashmere", TagCategory::Fabric),
            t("silk-charmeuse", "silk charmeuse", TagCategory::Fabric),
            t("wool-crepe", "wool crepe", TagCategory::Fabric),
            t("organic-cotton", "organic cotton", TagCategory::Fabric),
            // Construction
            t("ribbed-cuffs", "ribbed cuffs", TagCategory::Construction),
            t("french-seams", "french seams", TagCategory::Construction),
            t("raw-hem", "raw hem", TagCategory::Construction),
            t("princess-seams", "princess seams", TagCategory::Construction),
            // Lighting
            t("soft-studio-lighting", "soft studio lighting", TagCategory::Lighting),
            t("golden-hour-lighting", "golden hour lighting", TagCategory::Lighting),
            t("dramatic-rim-lighting", "dramatic rim lighting", TagCategory::Lighting),
            // Backgrounds
            t("seamless-white-background", "seamless white background", TagCategory::Background),
            t("urban-street-background", "urban street background", TagCategory::Background),
            // Other
            t("editorial-styling", "editorial styling", TagCategory::Other),
            t("delicate-jewelry", "delicate jewelry accents", TagCategory::Other),
        ])
    }
}

/// Stable tag id for an ad hoc term: lowercase, hyphen-separated.
pub fn slugify(term: &str) -> String {
    term.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_covers_all_categories() {
        let catalog = ModifierCatalog::default();
        for category in [
            TagCategory::Aesthetic,
            TagCategory::Color,
            TagCategory::Fabric,
            TagCategory::Construction,
            TagCategory::Lighting,
            TagCategory::Background,
            TagCategory::Other,
        ] {
            assert!(
                catalog.tags().iter().any(|t| t.category == category),
                "no default tags for {:?}",
                category
            );
        }
    }

    #[test]
    fn test_requested_attributes_become_candidates() {
        let catalog = ModifierCatalog::default();
        let mut attributes = AttributeBuckets::default();
        attributes.fabrics.insert("boiled wool".to_string());

        let candidates = catalog.candidates_for(&attributes);
        let ad_hoc = candidates.iter().find(|t| t.tag_id == "boiled-wool").unwrap();
        assert_eq!(ad_hoc.category, TagCategory::Fabric);
        assert!(candidates.len() > catalog.len());
    }

    #[test]
    fn test_requested_attribute_already_in_catalog_not_duplicated() {
        let catalog = ModifierCatalog::default();
        let mut attributes = AttributeBuckets::default();
        attributes.fabrics.insert("cashmere".to_string());

        let candidates = catalog.candidates_for(&attributes);
        let count = candidates.iter().filter(|t| t.tag_id == "cashmere").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Navy Blue"), "navy-blue");
        assert_eq!(slugify("  ribbed   cuffs "), "ribbed-cuffs");
    }

    #[test]
    fn test_upsert_replaces() {
        let mut catalog = ModifierCatalog::new(vec![]);
        catalog.upsert(CatalogTag::new("navy-blue", "navy blue", TagCategory::Color));
        catalog.upsert(CatalogTag::new("navy-blue", "deep navy blue", TagCategory::Color));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("navy-blue").unwrap().label, "deep navy blue");
    }
}
