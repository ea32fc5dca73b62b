pub mod error;
pub mod index;
pub mod persist;
pub mod query;
pub mod tokenizer;

pub use error::{Error, Result};
pub use index::{Index, IndexBuilder};
pub use query::{answer, ScoredDoc};
pub use tokenizer::{Tokenizer, TokenizerConfig};
