// Uniqueness engine: canonical fingerprints, fuzzy similarity against recent
// history, and opening-word diversity rules.

pub mod diversity;
pub mod filter;
pub mod fingerprint;

pub use diversity::DiversityVerdict;
pub use filter::{UniquenessFilter, UniquenessVerdict};
