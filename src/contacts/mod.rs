//! Contact domain, CSV bootstrap pipeline, and persistence contract.
//!
//! The bootstrap loader is the only non-trivial piece: it streams a CSV
//! contact export, validates each row, and saves the well-formed ones through
//! the [`ContactRepository`] trait. Malformed rows are skipped, never raised.

pub mod bootstrap;
pub mod domain;
pub mod repository;
pub mod router;

pub use bootstrap::{BootstrapError, CsvBootstrap};
pub use domain::{Contact, ContactId, Gender};
pub use repository::{ContactRepository, InMemoryContactRepository, RepositoryError};
pub use router::contacts_router;
