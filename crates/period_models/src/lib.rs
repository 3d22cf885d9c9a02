//! # Period Models (L2: Business Logic)
//!
//! Date periods, duration classification and segmentation.
//!
//! This crate provides:
//! - Periods built from years, months, days, dates or `YYYY[-MM[-DD]]` strings
//! - Duration classification and ISO 8601 duration strings
//! - Segmentation into days, isoweeks, months or years
//! - Cropping, month filtering and month exclusion rules for segments
//! - netCDF time coverage attributes
//!
//! ## Design Principles
//!
//! - **Immutable periods**: every operation that changes bounds returns a new period
//! - **Eager segmentation**: segment lists are computed once and replaced atomically
//! - **Builder pattern** for ergonomic API with sensible defaults
//!
//! ## Logging
//!
//! Segmentation emits `tracing` events (`debug` for segment counts, `trace`
//! for excluded segments). No subscriber is installed by this crate.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod periods;
