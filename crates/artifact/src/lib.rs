pub mod builder;
pub mod record;
pub mod script;
pub mod writer;

pub use builder::{IntegrityError, build};
pub use record::{DocumentMeta, DocumentRecord, SegmentRecord, SentenceRecord};
pub use script::{CreationScript, Statement};
pub use writer::{ArtifactPaths, ArtifactWriter};
