pub mod brand_profile;
pub mod catalog;
pub mod command;
pub mod config;
pub mod feedback;
pub mod portfolio;
pub mod prompt;
pub mod specificity;
pub mod style_tag;

pub use brand_profile::{BrandProfile, SignatureElement};
pub use catalog::{slugify, CatalogTag, ModifierCatalog};
pub use command::{AttributeBuckets, DesignCommand, GarmentFacts};
pub use config::{
    AssemblerConfig, BanditConfig, DatabaseConfig, EngineConfig, FeedbackConfig, LoggingConfig,
    SpecificityConfig,
};
pub use feedback::{FeedbackApplication, FeedbackEvent, FeedbackOutcome};
pub use portfolio::PortfolioDescriptor;
pub use prompt::{
    AppliedTag, AssemblyMetadata, GenerationExplanation, PromptAssembly, SelectedModifier,
};
pub use specificity::{ScoreFactor, SpecificityMode, SpecificityResult};
pub use style_tag::{StyleTag, TagCategory};
