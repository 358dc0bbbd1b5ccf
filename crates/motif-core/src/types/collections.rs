//! Re-exports of fast hash collections.

pub use rustc_hash::{FxHashMap, FxHashSet};
