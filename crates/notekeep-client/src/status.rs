//! HTTP status classification.
//!
//! Maps a non-success response to the error taxonomy. The same status means
//! different things depending on which operation received it: a 401 on login
//! is a credential mismatch, on a note operation it is an expired session.

use notekeep_core::Error;
use reqwest::StatusCode;

/// Operation that issued a request, used to interpret its response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
    Logout,
    ListNotes,
    SearchNotes,
    GetNote,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ListNotes => "list_notes",
            Self::SearchNotes => "search_notes",
            Self::GetNote => "get_note",
            Self::CreateNote => "create_note",
            Self::UpdateNote => "update_note",
            Self::DeleteNote => "delete_note",
        }
    }

    /// Whether the operation only makes sense with an authenticated session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::Register | Self::Login)
    }

    /// Whether the operation addresses a single note by id.
    fn targets_note(&self) -> bool {
        matches!(self, Self::GetNote | Self::UpdateNote | Self::DeleteNote)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a non-success response.
pub fn classify(op: Operation, status: StatusCode, body: &str) -> Error {
    let message = extract_message(body);
    let code = status.as_u16();

    match (op, code) {
        (Operation::Login, 400..=499) => Error::InvalidCredentials,
        (Operation::Register, 400 | 409) => {
            Error::Conflict(message.unwrap_or_else(|| "Username already exists".to_string()))
        }
        (op, 401 | 403) if op.requires_session() => Error::Unauthorized(
            message.unwrap_or_else(|| "session missing or expired".to_string()),
        ),
        (op, 404) if op.targets_note() => {
            Error::NotFound(message.unwrap_or_else(|| "note not found".to_string()))
        }
        _ => Error::Server {
            status: code,
            message: message
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default(),
        },
    }
}

/// Human-readable message from an error body.
///
/// JSON bodies contribute their `message` or `error` field; anything else is
/// used as plain text. Returns `None` for empty bodies.
pub fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = map.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return Some(text.trim().to_string());
                }
            }
        }
        return None;
    }

    Some(body.to_string())
}
