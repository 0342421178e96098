//! Hash collections used across titlecard, backed by AHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
