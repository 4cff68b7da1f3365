//! Matches free-text merchant listings against a canonical product catalog.
//!
//! Products are bucketed by manufacturer ([`catalog::CatalogIndex`]); every
//! listing is then scored against its manufacturer's bucket and grouped under
//! the best product ([`matcher::ListingMatcher`]).

pub mod catalog;
pub mod config;
pub mod matcher;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod storage;
