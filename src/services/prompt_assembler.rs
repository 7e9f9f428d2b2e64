//! Deterministic prompt assembly from garment facts and selected modifiers.
//!
//! Section order is a hard invariant regardless of selection order:
//! style descriptors, garment core, color, model/pose, accessories,
//! lighting/scene, technical quality terms. Within a section, higher-weight
//! modifiers come first.

use uuid::Uuid;

use crate::domain::clamp::clamp01;
use crate::domain::models::{
    AppliedTag, AssemblerConfig, AssemblyMetadata, BrandProfile, GarmentFacts, PromptAssembly,
    SelectedModifier, SpecificityResult, TagCategory,
};

/// Prompt sections in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Section {
    Style,
    Garment,
    Color,
    Pose,
    Accessories,
    Lighting,
}

impl Section {
    const ORDER: [Section; 6] = [
        Section::Style,
        Section::Garment,
        Section::Color,
        Section::Pose,
        Section::Accessories,
        Section::Lighting,
    ];

    fn for_category(category: TagCategory) -> Self {
        match category {
            TagCategory::Aesthetic => Self::Style,
            TagCategory::Fabric | TagCategory::Construction => Self::Garment,
            TagCategory::Color => Self::Color,
            TagCategory::Other => Self::Accessories,
            TagCategory::Lighting | TagCategory::Background => Self::Lighting,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    config: AssemblerConfig,
}

impl PromptAssembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Assemble the final prompt pair.
    ///
    /// An empty modifier set still produces a valid prompt from the garment
    /// facts plus the baseline negative prompt; cold-start users get a
    /// usable, if unpersonalized, result.
    pub fn assemble(
        &self,
        user_id: &str,
        facts: &GarmentFacts,
        modifiers: &[SelectedModifier],
        brand_profile: &BrandProfile,
        specificity: &SpecificityResult,
    ) -> PromptAssembly {
        let main_prompt = self.build_main_prompt(facts, modifiers);
        let negative_prompt = self.build_negative_prompt(brand_profile);
        let brand_consistency_estimate = brand_consistency(modifiers);

        PromptAssembly {
            assembly_id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            main_prompt,
            negative_prompt,
            applied_tags: modifiers.iter().map(AppliedTag::from).collect(),
            metadata: AssemblyMetadata {
                mode: specificity.mode,
                temperature: specificity.temperature,
                brand_consistency_estimate,
            },
        }
    }

    fn build_main_prompt(&self, facts: &GarmentFacts, modifiers: &[SelectedModifier]) -> String {
        let mut parts: Vec<String> = Vec::new();

        for section in Section::ORDER {
            match section {
                Section::Garment => {
                    parts.push(self.garment_phrase(facts));
                    parts.extend(self.section_terms(modifiers, section));
                }
                Section::Pose => {
                    parts.extend(facts.pose_directives.iter().cloned());
                }
                _ => parts.extend(self.section_terms(modifiers, section)),
            }
        }

        parts.extend(self.config.quality_terms.iter().cloned());
        parts.retain(|p| !p.trim().is_empty());
        parts.join(", ")
    }

    /// Modifier terms for one section, highest weight first, with emphasis
    /// markup on modifiers above the threshold.
    fn section_terms(&self, modifiers: &[SelectedModifier], section: Section) -> Vec<String> {
        let mut in_section: Vec<&SelectedModifier> = modifiers
            .iter()
            .filter(|m| Section::for_category(m.category) == section)
            .collect();
        in_section.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.tag_id.cmp(&b.tag_id))
        });
        in_section
            .into_iter()
            .map(|m| self.render_modifier(m))
            .collect()
    }

    /// High-weight modifiers get diffusion-style emphasis: `(label:1.25)`.
    fn render_modifier(&self, modifier: &SelectedModifier) -> String {
        if modifier.weight >= self.config.emphasis_threshold {
            let emphasis = 1.0 + modifier.weight;
            format!("({}:{:.2})", modifier.label, emphasis)
        } else {
            modifier.label.clone()
        }
    }

    fn garment_phrase(&self, facts: &GarmentFacts) -> String {
        let mut words: Vec<&str> = Vec::new();
        if let Some(fit) = &facts.fit {
            words.push(fit);
        }
        if let Some(silhouette) = &facts.silhouette {
            words.push(silhouette);
        }
        words.push(facts.garment_type_or_default());
        words.join(" ")
    }

    /// Baseline exclusions plus brand-exclusionary terms: a strong aesthetic
    /// signature pushes its competing looks into the negative prompt.
    fn build_negative_prompt(&self, brand_profile: &BrandProfile) -> String {
        let mut terms: Vec<String> = self.config.baseline_negative.clone();

        if brand_profile.has_signal() {
            let primary = brand_profile.primary_aesthetic.to_lowercase();
            if let Some(exclusions) = self.config.aesthetic_exclusions.get(&primary) {
                terms.extend(exclusions.iter().cloned());
            }
        }

        terms.join(", ")
    }
}

/// Estimated brand consistency: emphasis weight carried by brand-biased
/// modifiers. An estimate only; verified consistency comes from an external
/// post-generation validation step.
fn brand_consistency(modifiers: &[SelectedModifier]) -> f64 {
    clamp01(
        modifiers
            .iter()
            .filter(|m| m.brand_biased)
            .map(|m| m.weight)
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SpecificityMode;

    fn modifier(
        tag_id: &str,
        category: TagCategory,
        weight: f64,
        brand_biased: bool,
    ) -> SelectedModifier {
        SelectedModifier {
            tag_id: tag_id.to_string(),
            label: tag_id.replace('-', " "),
            category,
            weight,
            sampled_score: 0.5,
            final_score: 1.0,
            brand_biased,
        }
    }

    fn specificity() -> SpecificityResult {
        SpecificityResult::from_raw_score(0.5, vec![], 0.35, 0.65)
    }

    fn assembler() -> PromptAssembler {
        PromptAssembler::new(AssemblerConfig::default())
    }

    #[test]
    fn test_section_order_is_fixed_regardless_of_input_order() {
        let facts = GarmentFacts::new("dress").with_fit("fitted");
        // Deliberately scrambled input order.
        let modifiers = vec![
            modifier("golden-hour-lighting", TagCategory::Lighting, 0.1, false),
            modifier("navy-blue", TagCategory::Color, 0.1, false),
            modifier("minimalist-aesthetic", TagCategory::Aesthetic, 0.1, false),
            modifier("cashmere", TagCategory::Fabric, 0.1, false),
        ];
        let reversed: Vec<SelectedModifier> = modifiers.iter().rev().cloned().collect();

        let profile = BrandProfile::neutral("user-1");
        let a = assembler().assemble("user-1", &facts, &modifiers, &profile, &specificity());
        let b = assembler().assemble("user-1", &facts, &reversed, &profile, &specificity());
        assert_eq!(a.main_prompt, b.main_prompt);

        let aesthetic_pos = a.main_prompt.find("minimalist aesthetic").unwrap();
        let garment_pos = a.main_prompt.find("fitted dress").unwrap();
        let fabric_pos = a.main_prompt.find("cashmere").unwrap();
        let color_pos = a.main_prompt.find("navy blue").unwrap();
        let lighting_pos = a.main_prompt.find("golden hour lighting").unwrap();
        assert!(aesthetic_pos < garment_pos);
        assert!(garment_pos < fabric_pos);
        assert!(fabric_pos < color_pos);
        assert!(color_pos < lighting_pos);
    }

    #[test]
    fn test_higher_weight_first_within_section() {
        let facts = GarmentFacts::new("dress");
        let modifiers = vec![
            modifier("blush-pink", TagCategory::Color, 0.1, false),
            modifier("navy-blue", TagCategory::Color, 0.4, false),
        ];
        let prompt = assembler()
            .assemble(
                "user-1",
                &facts,
                &modifiers,
                &BrandProfile::neutral("user-1"),
                &specificity(),
            )
            .main_prompt;
        assert!(prompt.find("navy blue").unwrap() < prompt.find("blush pink").unwrap());
    }

    #[test]
    fn test_empty_modifiers_still_valid_prompts() {
        let facts = GarmentFacts::new("dress");
        let assembly = assembler().assemble(
            "user-1",
            &facts,
            &[],
            &BrandProfile::neutral("user-1"),
            &specificity(),
        );
        assert!(!assembly.main_prompt.is_empty());
        assert!(assembly.main_prompt.contains("dress"));
        assert!(!assembly.negative_prompt.is_empty());
        assert_eq!(assembly.metadata.brand_consistency_estimate, 0.0);
    }

    #[test]
    fn test_emphasis_markup_above_threshold() {
        let facts = GarmentFacts::new("dress");
        let modifiers = vec![modifier("navy-blue", TagCategory::Color, 0.5, false)];
        let prompt = assembler()
            .assemble(
                "user-1",
                &facts,
                &modifiers,
                &BrandProfile::neutral("user-1"),
                &specificity(),
            )
            .main_prompt;
        assert!(prompt.contains("(navy blue:1.50)"), "prompt: {prompt}");
    }

    #[test]
    fn test_brand_exclusions_in_negative_prompt() {
        let facts = GarmentFacts::new("dress");
        let mut profile = BrandProfile::neutral("user-1");
        profile.primary_aesthetic = "minimalist".to_string();
        profile.confidence = 0.8;

        let assembly =
            assembler().assemble("user-1", &facts, &[], &profile, &specificity());
        assert!(assembly.negative_prompt.contains("busy patterns"));
        assert!(assembly.negative_prompt.contains("low quality"));
    }

    #[test]
    fn test_no_exclusions_without_brand_signal() {
        let facts = GarmentFacts::new("dress");
        let assembly = assembler().assemble(
            "user-1",
            &facts,
            &[],
            &BrandProfile::neutral("user-1"),
            &specificity(),
        );
        assert!(!assembly.negative_prompt.contains("busy patterns"));
    }

    #[test]
    fn test_brand_consistency_estimate() {
        let facts = GarmentFacts::new("dress");
        let modifiers = vec![
            modifier("navy-blue", TagCategory::Color, 0.6, true),
            modifier("cashmere", TagCategory::Fabric, 0.4, false),
        ];
        let assembly = assembler().assemble(
            "user-1",
            &facts,
            &modifiers,
            &BrandProfile::neutral("user-1"),
            &specificity(),
        );
        assert!((assembly.metadata.brand_consistency_estimate - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_pose_directives_between_color_and_accessories() {
        let facts = GarmentFacts::new("dress").with_pose_directive("full body shot");
        let modifiers = vec![
            modifier("navy-blue", TagCategory::Color, 0.1, false),
            modifier("editorial-styling", TagCategory::Other, 0.1, false),
        ];
        let prompt = assembler()
            .assemble(
                "user-1",
                &facts,
                &modifiers,
                &BrandProfile::neutral("user-1"),
                &specificity(),
            )
            .main_prompt;
        let color = prompt.find("navy blue").unwrap();
        let pose = prompt.find("full body shot").unwrap();
        let accessories = prompt.find("editorial styling").unwrap();
        assert!(color < pose);
        assert!(pose < accessories);
    }

    #[test]
    fn test_metadata_carries_mode_and_temperature() {
        let facts = GarmentFacts::new("dress");
        let spec = specificity();
        let assembly = assembler().assemble(
            "user-1",
            &facts,
            &[],
            &BrandProfile::neutral("user-1"),
            &spec,
        );
        assert_eq!(assembly.metadata.mode, SpecificityMode::Balanced);
        assert!((assembly.metadata.temperature - spec.temperature).abs() < 1e-9);
    }
}
