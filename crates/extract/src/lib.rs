pub mod keywords;
pub mod registry;
pub mod schema;
pub mod stopwords;
pub mod tokenizer;

pub use keywords::extract_terms;
pub use registry::EntityRegistry;
pub use schema::{EmbeddingHandle, ENTITY_TYPE_TERM, Entity, MENTION_WEIGHT, Mention};
pub use tokenizer::{case_fold, tokenize};
