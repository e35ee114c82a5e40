// Batch processing stages: similarity, dedup, location normalization,
// store existence check, document mapping, file emission.

pub mod catalog;
pub mod dedupe;
pub mod emit;
pub mod existing;
pub mod locate;
pub mod similarity;

pub use dedupe::{dedupe, DedupeOutcome, DedupePolicy};
pub use existing::{ExistingRecordSet, ExistingRecords, SanityClient};
pub use locate::{match_location, Confidence, LocationMatch};
