//! Retrieval adapters - Player and monster reference data sources

mod catalog;
mod http_catalog;

pub use catalog::JsonCatalog;
pub use http_catalog::HttpCatalogClient;

#[cfg(test)]
pub(crate) use catalog::tests::test_catalog;
