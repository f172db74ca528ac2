use thiserror::Error;

use servicebill_core::{DomainError, RecordId};

/// Errors raised by storage adapters and the archive workflow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another stored record already uses this invoice number.
    #[error("duplicate invoice number: {0}")]
    DuplicateInvoiceNo(String),

    #[error("record not found: {0}")]
    NotFound(RecordId),

    /// Records are looked up by customer, so a name is required before saving.
    #[error("customer name is required before saving")]
    MissingCustomerName,

    #[error("logo is {size} bytes, the limit is {max} bytes")]
    LogoTooLarge { size: usize, max: usize },

    #[error("invalid logo: {0}")]
    InvalidLogo(String),

    /// The backing store cannot be used (e.g. poisoned lock, lost connection).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
