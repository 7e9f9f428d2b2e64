pub mod bandit_selector;
pub mod brand_dna;
pub mod decay_sweep;
pub mod explain_cache;
pub mod feedback_ingestor;
pub mod prompt_assembler;
pub mod prompt_engine;
pub mod provider_chain;
pub mod specificity_analyzer;

pub use bandit_selector::BanditSelector;
pub use brand_dna::BrandDnaExtractor;
pub use decay_sweep::DecaySweep;
pub use explain_cache::ExplainCache;
pub use feedback_ingestor::FeedbackIngestor;
pub use prompt_assembler::PromptAssembler;
pub use prompt_engine::PromptEngine;
pub use provider_chain::ProviderChain;
pub use specificity_analyzer::SpecificityAnalyzer;
