//! Atelier - Adaptive Prompt Synthesis Engine
//!
//! Atelier turns loosely specified garment design requests into weighted,
//! brand-consistent generation prompts, and improves that mapping over time
//! from user feedback.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, clamping primitives, errors, and
//!   the port traits persistence adapters implement
//! - **Service Layer** (`services`): Specificity analysis, Thompson-sampling
//!   modifier selection, prompt assembly, feedback ingestion, brand-DNA
//!   extraction, and the [`PromptEngine`] facade
//! - **Adapters** (`adapters`): SQLite and in-memory implementations of the
//!   ports
//! - **Infrastructure** (`infrastructure`): Configuration loading and
//!   logging setup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use atelier::adapters::sqlite::{
//!     initialize_database, SqliteBrandProfileProvider, SqliteStyleTagRepository,
//! };
//! use atelier::{DesignCommand, EngineConfig, GarmentFacts, PromptEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EngineConfig::default();
//!     let pool = initialize_database(&config.database).await?;
//!     let engine = PromptEngine::new(
//!         config,
//!         Arc::new(SqliteStyleTagRepository::new(pool.clone())),
//!         Arc::new(SqliteBrandProfileProvider::new(pool)),
//!     );
//!
//!     let command = DesignCommand::new("a sporty chic cashmere dress in navy", 1);
//!     let assembly = engine
//!         .generate_weighted_prompt("designer-1", &command, &GarmentFacts::new("dress"), None)
//!         .await?;
//!     println!("{}", assembly.main_prompt);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AppliedTag, AttributeBuckets, BrandProfile, CatalogTag, DesignCommand, EngineConfig,
    FeedbackApplication, FeedbackEvent, FeedbackOutcome, GarmentFacts, GenerationExplanation,
    ModifierCatalog, PortfolioDescriptor, PromptAssembly, SelectedModifier, SignatureElement,
    SpecificityMode, SpecificityResult, StyleTag, TagCategory,
};
pub use domain::ports::{BrandProfileProvider, StyleTagRepository};
pub use infrastructure::{init_logging, ConfigError, ConfigLoader};
pub use services::{
    BanditSelector, BrandDnaExtractor, DecaySweep, FeedbackIngestor, PromptAssembler,
    PromptEngine, SpecificityAnalyzer,
};
