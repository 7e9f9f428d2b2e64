//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that persistence adapters must implement:
//! - `StyleTagRepository`: Beta belief state per (user, tag) with atomic
//!   feedback increments
//! - `BrandProfileProvider`: read access to distilled brand signatures
//!
//! These contracts keep the scoring core independent of any particular
//! store.

pub mod brand_profile_provider;
pub mod style_tag_repository;

pub use brand_profile_provider::BrandProfileProvider;
pub use style_tag_repository::StyleTagRepository;
