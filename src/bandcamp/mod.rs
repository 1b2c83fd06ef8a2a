//! # Bandcamp Integration Module
//!
//! This module is the integration layer between campdl and the Bandcamp
//! platform. It handles all HTTP communication, the platform's embedded
//! page-data convention, cursor pagination over the two collection
//! partitions, and the two-step handshake that turns a redownload URL into
//! a signed CDN link.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Bandcamp Integration Layer
//!     ├── Client (cookie auth, user agent, crumb refresh)
//!     ├── Collection (summary, fan page, pagination)
//!     └── Download (resolution handshake, streaming transfer)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Bandcamp API / CDN
//! ```
//!
//! ## Core Modules
//!
//! ### Client Module
//!
//! [`client`] - Authenticated request helpers:
//! - **Cookie Authentication**: every request carries `identity=<credential>`
//! - **JSON and HTML Fetching**: the two content shapes the platform serves
//! - **Crumb Refresh**: re-issues a call once when the anti-forgery crumb
//!   is reported stale, rebuilding the payload with the fresh crumb
//!
//! ### Collection Module
//!
//! [`collection`] - Purchase enumeration:
//! - **Summary Lookup**: resolves the fan account behind the cookie
//! - **Fan Page Cache**: the profile page embeds the first page of both
//!   partitions along with their pagination cursors
//! - **Cursor Pagination**: pages are fetched until the server's own
//!   no-more signal; cursors are immutable request values, rebuilt per page
//!
//! ### Download Module
//!
//! [`download`] - Artifact retrieval:
//! - **Two-Step Resolution**: redownload page → statdownload endpoint →
//!   time-limited signed URL
//! - **Streaming Transfer**: chunked writes with byte progress, partial
//!   files removed on any mid-stream failure
//!
//! ## Error Handling
//!
//! All functions return [`crate::error::SyncError`]; there is no retry tier
//! beyond the single crumb refresh. A transport failure, an unexpected
//! payload shape, or a violated platform invariant aborts the whole run.

pub mod client;
pub mod collection;
pub mod download;
