//! User-visible outcome messages.
//!
//! Every error is caught where the request was issued and turned into a
//! [`Notice`]; nothing propagates further. An `Unauthorized` error on any
//! operation becomes [`Notice::LoginRequired`], the cue to send the user back
//! to the login surface.

use notekeep_core::Error;

/// User action that produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Register,
    Login,
    Logout,
    List,
    Show,
    Create,
    Update,
    Delete,
    Search,
}

/// Message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
    LoginRequired,
}

impl Notice {
    /// Message for a completed action. `None` when the result speaks for itself.
    pub fn for_success(action: Action, username: Option<&str>) -> Option<Notice> {
        let message = match action {
            Action::Register => "Registration successful! Please login.".to_string(),
            Action::Login => match username {
                Some(name) => format!("Logged in as {}", name),
                None => "Logged in".to_string(),
            },
            Action::Logout => "Logged out".to_string(),
            Action::Create => "Note saved".to_string(),
            Action::Update => "Note updated".to_string(),
            Action::Delete => "Note deleted".to_string(),
            Action::List | Action::Show | Action::Search => return None,
        };
        Some(Notice::Success(message))
    }

    /// Message for a failed action.
    pub fn for_error(action: Action, err: &Error) -> Notice {
        if err.is_unauthorized() {
            return Notice::LoginRequired;
        }

        let message = match (action, err) {
            (_, Error::Validation(msg)) => capitalize(msg),
            (Action::Login, Error::InvalidCredentials) => err.to_string(),
            (Action::Login, _) => format!("Login failed: {}", err),
            (Action::Register, Error::Conflict(msg)) => msg.clone(),
            (Action::Register, _) => "Registration failed".to_string(),
            (Action::Show | Action::Update, Error::NotFound(_)) => "Note not found".to_string(),
            (Action::Create, _) => "Failed to save note".to_string(),
            (Action::Update, _) => "Failed to update note".to_string(),
            (Action::Delete, _) => "Failed to delete note".to_string(),
            (Action::List | Action::Show, _) => "Failed to load notes".to_string(),
            (Action::Search, _) => "Search failed".to_string(),
            (Action::Logout, _) => "Logged out".to_string(),
        };
        Notice::Failure(message)
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Success(_))
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(msg) | Notice::Failure(msg) => f.write_str(msg),
            Notice::LoginRequired => f.write_str("Session expired or missing. Please login."),
        }
    }
}

fn capitalize(msg: &str) -> String {
    let mut chars = msg.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
