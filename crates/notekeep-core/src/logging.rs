//! Structured logging schema for notekeep.
//!
//! All crates emit `tracing` events with the same field names so output can be
//! filtered consistently regardless of which layer produced it.
//!
//! ## Fields
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `subsystem` | One of the `SUBSYSTEM_*` values below |
//! | `op` | Logical operation (`list_notes`, `login`, ...) |
//! | `username` | Session owner (never the password) |
//! | `note_id` | Note being operated on |
//! | `query` | Search text |
//! | `result_count` | Notes returned by a list or search |
//! | `status` | HTTP status code |
//! | `duration_ms` | Wall-clock duration |
//! | `error` | Error message when an operation fails |
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Unrecoverable failure surfaced to the user |
//! | WARN  | Recoverable issue, fallback applied (malformed list, logout failure, expiry) |
//! | INFO  | Session lifecycle, note mutations |
//! | DEBUG | Request dispatch, intermediate values |
//! | TRACE | Per-item iteration |
//!
//! Passwords and session credentials are never logged.

/// HTTP note store client.
pub const SUBSYSTEM_CLIENT: &str = "client";

/// In-memory note store.
pub const SUBSYSTEM_MEMORY: &str = "memory";

/// Command-line front end.
pub const SUBSYSTEM_CLI: &str = "cli";
