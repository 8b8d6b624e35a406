pub mod allocator;

pub use allocator::{AllocatorError, IdAllocator, IdKind, IdMode};
