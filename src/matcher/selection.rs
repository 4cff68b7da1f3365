use crate::model::{MatchOutcome, Product};
use crate::normalizer::normalize;

/// Scores a normalized model against a normalized title.
/// The score is the model length in characters when it occurs in the title, 0 otherwise.
pub fn score(normalized_title: &str, normalized_model: &str) -> i64 {
    if normalized_title.contains(normalized_model) {
        normalized_model.chars().count() as i64
    } else {
        0
    }
}

/// Picks the best candidate for a title.
///
/// Candidates are scored in order and the best is only replaced on a strictly
/// higher score, so the earliest candidate wins a tie. Any candidate beats the
/// sentinel, which means a non-empty bucket always yields a match, possibly with
/// score 0.
pub fn select<'a>(normalized_title: &str, candidates: &'a [Product]) -> MatchOutcome<'a> {
    let mut best = MatchOutcome::none();

    for product in candidates {
        let current = score(normalized_title, &normalize(&product.model));
        if current > best.score {
            best.score = current;
            best.product = Some(product);
        }
    }

    best
}
