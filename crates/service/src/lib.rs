//! Service layer providing the catalog's data access and business rules.
//! - `catalog::repository` defines the storage capability set.
//! - `catalog::repo::seaorm` is the SQLite-backed implementation.
//! - `catalog::service` applies validation before touching storage.

pub mod errors;
pub mod pagination;
pub mod catalog;
pub mod bootstrap;
#[cfg(test)]
pub mod test_support;
