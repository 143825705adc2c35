//! Text scoring collaborators.
//!
//! - [`SemanticScorer`]: answer vs. reference similarity ([`EmbeddingSemanticScorer`]).
//! - [`ConceptScorer`]: key-concept coverage ([`RegexConceptScorer`]).
//!
//! Both are consumed generically by the orchestrator, so tests substitute the
//! scripted doubles from `mock` without touching it.

pub mod concept;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod semantic;


pub use concept::{ConceptScorer, RegexConceptScorer};
pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockConceptScorer, MockSemanticScorer};
pub use semantic::{EmbeddingSemanticScorer, SemanticScorer};
