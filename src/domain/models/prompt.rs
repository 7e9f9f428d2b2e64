//! Prompt assembly output models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::models::{SpecificityMode, SpecificityResult, TagCategory};

/// A modifier chosen by the bandit selector, ready for assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedModifier {
    pub tag_id: String,
    /// Prompt text for the modifier (e.g. "soft ribbed cuffs").
    pub label: String,
    pub category: TagCategory,
    /// Normalized emphasis weight within the selected set; sums to 1.
    pub weight: f64,
    /// The Thompson sample that ranked this modifier.
    pub sampled_score: f64,
    /// Final score after brand bias and exploration bonus.
    pub final_score: f64,
    /// Whether the brand profile contributed a nonzero bias.
    pub brand_biased: bool,
}

/// Record of one applied tag, carried into feedback events and explanations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedTag {
    pub tag_id: String,
    pub category: TagCategory,
    pub weight: f64,
    pub sampled_score: f64,
    pub brand_biased: bool,
}

impl From<&SelectedModifier> for AppliedTag {
    fn from(modifier: &SelectedModifier) -> Self {
        Self {
            tag_id: modifier.tag_id.clone(),
            category: modifier.category,
            weight: modifier.weight,
            sampled_score: modifier.sampled_score,
            brand_biased: modifier.brand_biased,
        }
    }
}

/// Metadata attached to an assembled prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    pub mode: SpecificityMode,
    pub temperature: f64,
    /// Estimated (not verified) brand consistency in [0, 1]: the emphasis
    /// weight carried by brand-biased modifiers. A verified score would come
    /// from post-generation validation, which is outside this engine.
    pub brand_consistency_estimate: f64,
}

/// Final output of prompt synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptAssembly {
    pub assembly_id: Uuid,
    pub user_id: String,
    pub main_prompt: String,
    pub negative_prompt: String,
    pub applied_tags: Vec<AppliedTag>,
    pub metadata: AssemblyMetadata,
}

/// Diagnostic record of one generation, served by the explain surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationExplanation {
    pub assembly_id: Uuid,
    pub user_id: String,
    pub specificity: SpecificityResult,
    pub applied_tags: Vec<AppliedTag>,
    pub brand_consistency_estimate: f64,
}
