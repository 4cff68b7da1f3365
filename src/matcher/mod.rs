// Matcher module: candidate scoring and the per-listing matching pass.

pub mod selection;
pub mod listing_matcher;

// Re-export the main matcher implementation for ease of use.
pub use listing_matcher::{ListingMatcher, MatchPolicy, MatchStats, ResultGrouping};
