//! Evidence retrieval over a chunked textbook corpus.

pub mod corpus;
pub mod dense;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod types;


pub use corpus::load_corpus;
pub use dense::{DenseRetriever, Retriever};
pub use error::RetrievalError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRetriever;
pub use types::Passage;
