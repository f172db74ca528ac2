//! Infrastructure layer: invoice record storage, branding preferences,
//! configuration and the archive workflow built on top of them.

pub mod archive;
pub mod config;
pub mod error;
pub mod preferences;
pub mod record_store;

pub use archive::{ArchiveOutcome, InvoiceArchive};
pub use config::AppConfig;
pub use error::StoreError;
pub use preferences::{BrandingPreferences, InMemoryPreferenceStore, PreferenceStore};
pub use record_store::{InMemoryInvoiceStore, InvoiceRecordStore, SavedInvoice};
