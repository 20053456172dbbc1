//! Shas Domain Layer
//!
//! Core data model for the commentary corpus. Every other crate in the
//! workspace depends on these types; this crate depends on nothing outside
//! the standard library.
//!
//! ## Key Concepts
//!
//! - **SourceDocument**: a read-only record handed over by the document store
//! - **Structure**: the closed union of content shapes (list, mapping, absent)
//! - **SectionEntry**: a section identifier with its ordered, non-empty text blocks
//! - **WorkRecord**: every section discovered for one (author, work) pair
//! - **CanonicalKey**: `{Author}_{Work}.{section_id}`, the unit addressed downstream
//! - **Corpus**: the ordered mapping CanonicalKey → blocks
//! - **ConsolidationRule**: Delete, Rename, or MergeUnderCanonical
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure data and invariants only
//! - Trait definitions for the document store and corpus persistence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod corpus;
pub mod document;
pub mod key;
pub mod rule;
pub mod section;
pub mod traits;
pub mod work;

// Re-exports for convenience
pub use corpus::Corpus;
pub use document::{ContentNode, SourceDocument, Structure};
pub use key::{labels_match, normalize_component, normalize_label, CanonicalKey};
pub use rule::{ConsolidationRule, RuleKind};
pub use section::SectionEntry;
pub use work::WorkRecord;
