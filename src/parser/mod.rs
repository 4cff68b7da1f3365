// Parser module: decoding of the products and listings inputs.

pub mod jsonl_parser;

pub use jsonl_parser::{JsonLines, listings, products};
