//! Centralized default constants for notekeep.
//!
//! Other crates reference these instead of defining their own values.

// =============================================================================
// SERVER
// =============================================================================

/// Base URL of the note server. The server mounts its routes under `/api`.
pub const BASE_URL: &str = "http://localhost:8080/api";

/// Transport timeout for a single request.
pub const TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("notekeep/", env!("CARGO_PKG_VERSION"));

// =============================================================================
// ROUTES
// =============================================================================

pub const ROUTE_REGISTER: &str = "/auth/register";
pub const ROUTE_LOGIN: &str = "/auth/login";
pub const ROUTE_LOGOUT: &str = "/auth/logout";
pub const ROUTE_NOTES: &str = "/notes";
pub const ROUTE_SEARCH: &str = "/notes/search";

// =============================================================================
// SESSION
// =============================================================================

/// File name of the persisted session inside the user's config directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Directory name under the user's config directory.
pub const CONFIG_DIR_NAME: &str = "notekeep";
