// Catalog module: manufacturer-scoped product index.

pub mod index;

pub use index::CatalogIndex;
