//! `servicebill-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the invoice model
//! and its storage adapters (no IO, no storage).

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{RecordId, RowId};
