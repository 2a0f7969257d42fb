//! Session persistence between command-line invocations.
//!
//! The session is stored as JSON. An anonymous session is represented by the
//! absence of the file. On Unix the file is created readable by the owner
//! only, since it holds the session cookie.

use std::fs;
use std::path::{Path, PathBuf};

use notekeep_core::defaults::{CONFIG_DIR_NAME, SESSION_FILE_NAME};
use notekeep_core::logging::SUBSYSTEM_CLI;
use notekeep_core::{Result, Session};
use tracing::{debug, warn};

/// `<config dir>/notekeep/session.json`, if the platform has a config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(SESSION_FILE_NAME))
}

/// Load a saved session. Missing or unreadable contents yield `Anonymous`.
pub fn load(path: &Path) -> Result<Session> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Session::Anonymous),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => {
            debug!(
                subsystem = SUBSYSTEM_CLI,
                path = %path.display(),
                authenticated = session.is_authenticated(),
                "Loaded saved session"
            );
            Ok(session)
        }
        Err(e) => {
            warn!(
                subsystem = SUBSYSTEM_CLI,
                path = %path.display(),
                error = %e,
                "Ignoring corrupt session file"
            );
            Ok(Session::Anonymous)
        }
    }
}

/// Persist `session`; an anonymous session removes the file.
pub fn save(path: &Path, session: &Session) -> Result<()> {
    if !session.is_authenticated() {
        return clear(path);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(session)?;
    write_private(path, json.as_bytes())?;
    debug!(subsystem = SUBSYSTEM_CLI, path = %path.display(), "Saved session");
    Ok(())
}

/// Remove the saved session, if any.
pub fn clear(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(bytes)
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    fs::write(path, bytes)
}
