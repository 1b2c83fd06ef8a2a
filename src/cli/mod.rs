//! # CLI Module
//!
//! This module provides the command-line interface layer for campdl. The
//! tool has a single job, so there is a single command: walk the whole
//! collection and download every purchase that is missing locally.
//!
//! ## Data Flow
//!
//! ```text
//! CLI Layer (status output, counters)
//!     ↓
//! Management Layer (credential, local library oracle)
//!     ↓
//! Bandcamp Layer (pagination, resolution, transfer)
//!     ↓
//! Network Layer (HTTP requests)
//! ```
//!
//! The pipeline is strictly sequential: one purchase is checked, resolved
//! and transferred before the next one is looked at. Every error that is
//! not the normal "already downloaded" branch is fatal and exits 1.

mod collection;

pub use collection::sync_collection;
