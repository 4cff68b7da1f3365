use crate::catalog::CatalogIndex;
use crate::matcher::selection::select;
use crate::model::{Listing, Product};
use crate::normalizer::{lookup_manufacturer, normalize};
use std::collections::HashMap;
use tracing::debug;

/// How a zero score is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Any non-empty manufacturer bucket produces a match, even at score 0.
    #[default]
    Compatible,
    /// A match needs at least one model found in the title.
    RequirePositiveScore,
}

impl MatchPolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::RequirePositiveScore
        } else {
            Self::Compatible
        }
    }
}

/// Listings grouped by matched product name.
///
/// Groups are kept in the order their product first matched; listings inside
/// a group keep input order.
#[derive(Debug, Default)]
pub struct ResultGrouping {
    groups: Vec<(String, Vec<Listing>)>,
    positions: HashMap<String, usize>,
}

impl ResultGrouping {
    pub fn push(&mut self, product_name: &str, listing: Listing) {
        let position = match self.positions.get(product_name) {
            Some(&position) => position,
            None => {
                self.groups.push((product_name.to_owned(), Vec::new()));
                self.positions
                    .insert(product_name.to_owned(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[position].1.push(listing);
    }

    pub fn get(&self, product_name: &str) -> Option<&[Listing]> {
        self.positions
            .get(product_name)
            .map(|&position| self.groups[position].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Listing])> {
        self.groups
            .iter()
            .map(|(name, listings)| (name.as_str(), listings.as_slice()))
    }

    /// Number of product groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn listing_count(&self) -> usize {
        self.groups.iter().map(|(_, listings)| listings.len()).sum()
    }
}

/// Counters collected during one matching pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub listings: usize,
    pub matched: usize,
    pub unknown_manufacturer: usize,
    pub zero_score: usize,
}

impl MatchStats {
    pub fn unmatched(&self) -> usize {
        self.listings - self.matched
    }
}

pub struct ListingMatcher {
    policy: MatchPolicy,
}

impl ListingMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Finds the product a single listing refers to, if any.
    pub fn match_listing<'a>(&self, index: &'a CatalogIndex, listing: &Listing) -> Option<&'a Product> {
        self.evaluate(index, listing, &mut MatchStats::default())
    }

    fn evaluate<'a>(
        &self,
        index: &'a CatalogIndex,
        listing: &Listing,
        stats: &mut MatchStats,
    ) -> Option<&'a Product> {
        stats.listings += 1;
        let normalized_title = normalize(&listing.title);
        let manufacturer = lookup_manufacturer(&listing.manufacturer);
        let candidates = index.candidates(manufacturer);

        if candidates.is_empty() {
            stats.unknown_manufacturer += 1;
            debug!(manufacturer = %manufacturer, title = %listing.title, "no products for manufacturer");
            return None;
        }

        let outcome = select(&normalized_title, candidates);
        if outcome.score == 0 {
            stats.zero_score += 1;
            if self.policy == MatchPolicy::RequirePositiveScore {
                debug!(title = %listing.title, "no model found in title");
                return None;
            }
        }

        let product = outcome.matched()?;
        stats.matched += 1;
        debug!(title = %listing.title, product = %product.product_name, score = outcome.score, "matched");
        Some(product)
    }

    /// Groups listings by matched product name. Unmatched listings are left out.
    pub fn process<I>(&self, index: &CatalogIndex, listings: I) -> ResultGrouping
    where
        I: IntoIterator<Item = Listing>,
    {
        let mut grouping = ResultGrouping::default();
        let mut stats = MatchStats::default();
        for listing in listings {
            self.accept(index, listing, &mut grouping, &mut stats);
        }
        grouping
    }

    /// Like [`ListingMatcher::process`] over a fallible source.
    /// The first decoding error ends the pass and is returned as is.
    pub fn try_process<I, E>(&self, index: &CatalogIndex, listings: I) -> Result<(ResultGrouping, MatchStats), E>
    where
        I: IntoIterator<Item = Result<Listing, E>>,
    {
        let mut grouping = ResultGrouping::default();
        let mut stats = MatchStats::default();
        for listing in listings {
            self.accept(index, listing?, &mut grouping, &mut stats);
        }
        Ok((grouping, stats))
    }

    fn accept(&self, index: &CatalogIndex, listing: Listing, grouping: &mut ResultGrouping, stats: &mut MatchStats) {
        if let Some(product) = self.evaluate(index, &listing, stats) {
            grouping.push(&product.product_name, listing);
        }
    }
}

/// Runs the default matcher over the listings.
pub fn process<I>(index: &CatalogIndex, listings: I) -> ResultGrouping
where
    I: IntoIterator<Item = Listing>,
{
    ListingMatcher::new(MatchPolicy::default()).process(index, listings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;
    use crate::catalog::index::tests::product;
    use serde_json::{Value, json};

    fn listing(value: Value) -> Listing {
        match value {
            Value::Object(map) => Listing::from_object(map).unwrap(),
            _ => panic!("not an object"),
        }
    }

    fn titles(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.title.as_str()).collect()
    }

    #[test]
    fn end_to_end_scenario() {
        let index = CatalogIndex::build(vec![product("Canon", "Canon EOS 5D", "EOS 5D")]);
        let input = listing(json!({"manufacturer": "Canon Canada", "title": "Canon EOS-5D Body Only"}));

        let grouping = process(&index, vec![input.clone()]);

        assert_eq!(grouping.len(), 1);
        assert_eq!(grouping.get("Canon EOS 5D").unwrap(), &[input]);
    }

    #[test]
    fn canada_suffix_uses_same_bucket() {
        let index = CatalogIndex::build(vec![product("Canon", "Canon EOS 5D", "EOS 5D")]);
        let matcher = ListingMatcher::new(MatchPolicy::default());

        let plain = listing(json!({"manufacturer": "Canon", "title": "EOS 5D"}));
        let regional = listing(json!({"manufacturer": "Canon Canada", "title": "EOS 5D"}));

        assert_eq!(
            matcher.match_listing(&index, &plain).map(|p| &p.product_name),
            matcher.match_listing(&index, &regional).map(|p| &p.product_name),
        );
    }

    #[test]
    fn unknown_manufacturer_is_excluded() {
        let index = CatalogIndex::build(vec![product("Canon", "Canon EOS 5D", "EOS 5D")]);
        let grouping = process(
            &index,
            vec![listing(json!({"manufacturer": "Leica", "title": "Canon EOS 5D lookalike"}))],
        );
        assert!(grouping.is_empty());
        assert_eq!(grouping.listing_count(), 0);
    }

    #[test]
    fn zero_score_depends_on_policy() {
        let index = CatalogIndex::build(vec![
            product("Canon", "Canon PowerShot A1100", "A1100 IS"),
            product("Canon", "Canon EOS 7D", "EOS 7D"),
        ]);
        let input = vec![listing(json!({"manufacturer": "Canon", "title": "Canon battery charger"}))];

        let compatible = ListingMatcher::new(MatchPolicy::Compatible);
        let grouping = compatible.process(&index, input.clone());
        assert_eq!(grouping.get("Canon PowerShot A1100").unwrap().len(), 1);

        let strict = ListingMatcher::new(MatchPolicy::from_strict(true));
        let (grouping, stats) = strict
            .try_process(&index, input.into_iter().map(Ok::<_, ()>))
            .unwrap();
        assert!(grouping.is_empty());
        assert_eq!(stats.zero_score, 1);
        assert_eq!(stats.unmatched(), 1);
    }

    #[test]
    fn grouping_preserves_input_order() {
        let index = CatalogIndex::build(vec![
            product("Nikon", "Nikon D90", "D90"),
            product("Nikon", "Nikon D3100", "D3100"),
        ]);
        let input = vec![
            listing(json!({"manufacturer": "Nikon", "title": "Nikon D3100 first"})),
            listing(json!({"manufacturer": "Nikon", "title": "Nikon D90 a"})),
            listing(json!({"manufacturer": "Nikon", "title": "Nikon D3100 second"})),
            listing(json!({"manufacturer": "Nikon", "title": "Nikon D90 b"})),
        ];

        let grouping = process(&index, input);

        let order: Vec<&str> = grouping.iter().map(|(name, _)| name).collect();
        assert_eq!(order, ["Nikon D3100", "Nikon D90"]);
        assert_eq!(titles(grouping.get("Nikon D3100").unwrap()), ["Nikon D3100 first", "Nikon D3100 second"]);
        assert_eq!(titles(grouping.get("Nikon D90").unwrap()), ["Nikon D90 a", "Nikon D90 b"]);
    }

    #[test]
    fn listings_are_evaluated_independently() {
        let index = CatalogIndex::build(vec![
            product("Nikon", "Nikon D90", "D90"),
            product("Nikon", "Nikon D3100", "D3100"),
        ]);
        let a = listing(json!({"manufacturer": "Nikon", "title": "Nikon D3100"}));
        let b = listing(json!({"manufacturer": "Nikon", "title": "Nikon D90"}));

        let forward = process(&index, vec![a.clone(), b.clone()]);
        let backward = process(&index, vec![b, a]);

        assert_eq!(forward.get("Nikon D90"), backward.get("Nikon D90"));
        assert_eq!(forward.get("Nikon D3100"), backward.get("Nikon D3100"));
    }

    #[test]
    fn try_process_propagates_decoding_error() {
        let index = CatalogIndex::build(vec![product("Canon", "Canon EOS 5D", "EOS 5D")]);
        let source = vec![
            Ok(listing(json!({"manufacturer": "Canon", "title": "EOS 5D"}))),
            Err("line 2"),
        ];
        let matcher = ListingMatcher::new(MatchPolicy::default());
        assert_eq!(matcher.try_process(&index, source).unwrap_err(), "line 2");
    }

    #[test]
    fn stats_count_outcomes() {
        let index = CatalogIndex::build(vec![product("Canon", "Canon EOS 5D", "EOS 5D")]);
        let source = vec![
            listing(json!({"manufacturer": "Canon", "title": "EOS 5D"})),
            listing(json!({"manufacturer": "Canon", "title": "lens cap"})),
            listing(json!({"manufacturer": "Olympus", "title": "E-PL1"})),
        ];
        let matcher = ListingMatcher::new(MatchPolicy::default());
        let (grouping, stats) = matcher
            .try_process(&index, source.into_iter().map(Ok::<_, ()>))
            .unwrap();

        assert_eq!(grouping.listing_count(), 2);
        assert_eq!(
            stats,
            MatchStats { listings: 3, matched: 2, unknown_manufacturer: 1, zero_score: 1 }
        );
    }
}
