use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Width of the counter field in emitted IDs. The counter must stay within
/// this width so IDs sort by allocation order inside one scope.
const COUNTER_WIDTH: u32 = 6;
const COUNTER_MAX: u64 = 10u64.pow(COUNTER_WIDTH) - 1;

/// Hex chars taken from the parent-context hash.
const PREFIX_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum AllocatorError {
    /// The monotone counter ran past its field width. Continuing would
    /// silently break the uniqueness invariant, so this is fatal for the run.
    #[error("id allocator exhausted after {0} allocations")]
    Exhausted(u64),
}

/// What kind of node an identifier names. The tag is embedded in the ID
/// string so the kind can be recovered from the ID alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Document,
    Segment,
    Sentence,
    Entity,
}

impl IdKind {
    pub fn tag(&self) -> &'static str {
        match self {
            IdKind::Document => "doc",
            IdKind::Segment => "seg",
            IdKind::Sentence => "sen",
            IdKind::Entity => "ent",
        }
    }

    /// Recover the kind from an identifier string.
    pub fn from_id(id: &str) -> Option<IdKind> {
        match id.split('_').next() {
            Some("doc") => Some(IdKind::Document),
            Some("seg") => Some(IdKind::Segment),
            Some("sen") => Some(IdKind::Sentence),
            Some("ent") => Some(IdKind::Entity),
            _ => None,
        }
    }
}

/// Whether re-ingesting byte-identical content reproduces the same IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdMode {
    /// Fresh identifier set on every run: the clock component is the
    /// millisecond wall-clock time at allocation.
    WallClock,
    /// Same input + same seed reproduce the same identifiers: the clock
    /// component is derived from the seed and the parent context instead
    /// of the wall clock.
    Deterministic { seed: u64 },
}

/// Issues hierarchical identifiers for one ingestion run.
///
/// An ID is `<tag>_<ctx>_<clock>_<counter>`: a kind tag, a fixed-width hash
/// prefix of the parent context (identical parents are visually traceable),
/// a millisecond clock (or seed-derived stand-in), and a zero-padded
/// monotone counter that breaks ties within one millisecond. Entity IDs
/// append a short type tag on top.
///
/// One allocator instance scopes one run (typically one document); there is
/// no process-global state. The counter is atomic, so a single instance may
/// be shared across threads, but a (clock, counter) pair is never reissued
/// within an instance.
pub struct IdAllocator {
    mode: IdMode,
    counter: AtomicU64,
}

impl IdAllocator {
    pub fn new(mode: IdMode) -> Self {
        Self::with_counter_start(mode, 0)
    }

    /// Start the counter above zero. Lets a sharded setup hand each shard
    /// its own counter range while keeping the exhaustion check intact.
    pub fn with_counter_start(mode: IdMode, start: u64) -> Self {
        Self {
            mode,
            counter: AtomicU64::new(start),
        }
    }

    pub fn mode(&self) -> IdMode {
        self.mode
    }

    /// Allocate the next identifier under `parent_context`.
    pub fn allocate(&self, kind: IdKind, parent_context: &str) -> Result<String, AllocatorError> {
        let seq = self.counter.fetch_add(1, Ordering::SeqCst);
        if seq > COUNTER_MAX {
            return Err(AllocatorError::Exhausted(seq));
        }

        let clock = match self.mode {
            IdMode::WallClock => Utc::now().timestamp_millis() as u64,
            IdMode::Deterministic { seed } => stable_clock(seed, parent_context),
        };

        Ok(format!(
            "{}_{}_{}_{:0width$}",
            kind.tag(),
            context_prefix(parent_context),
            clock,
            seq,
            width = COUNTER_WIDTH as usize
        ))
    }

    /// Allocate an entity identifier carrying its type tag.
    pub fn allocate_entity(
        &self,
        parent_context: &str,
        type_tag: &str,
    ) -> Result<String, AllocatorError> {
        let id = self.allocate(IdKind::Entity, parent_context)?;
        Ok(format!("{}_{}", id, type_tag))
    }
}

/// Fixed-width hash prefix of the parent context.
fn context_prefix(context: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(context.as_bytes());
    let digest = hasher.finalize();
    hex::encode(&digest[..PREFIX_LEN / 2])
}

/// Seed-derived stand-in for the millisecond clock, kept to the same 13
/// decimal digits so deterministic and wall-clock IDs share a shape.
fn stable_clock(seed: u64, context: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_be_bytes());
    hasher.update(context.as_bytes());
    let digest = hasher.finalize();
    let raw = u64::from_be_bytes(digest[..8].try_into().unwrap());
    raw % 10u64.pow(13)
}
