//! Explicit session state.
//!
//! The session credential is opaque to the application: it is whatever cookie
//! pairs the server set on login, replayed verbatim on every later request.
//! Stores hold a [`Session`] instead of relying on a hidden cookie jar so that
//! the state machine `Anonymous -> Authenticated -> Anonymous` can be
//! inspected, persisted, and tested directly.

use serde::{Deserialize, Serialize};

/// Opaque session credential, as sent in a `Cookie` request header.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionCredential(String);

impl SessionCredential {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self(cookie.into())
    }

    /// Build a credential from `Set-Cookie` header values.
    ///
    /// Only the leading `name=value` pair of each header is kept; attributes
    /// such as `Path` or `HttpOnly` are dropped. Returns `None` when no header
    /// carries a usable pair.
    pub fn from_set_cookie<'a>(headers: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut merged = Self(String::new());
        for header in headers {
            if let Some((name, value)) = cookie_pair(header) {
                merged.set(name, value);
            }
        }
        if merged.0.is_empty() {
            None
        } else {
            Some(merged)
        }
    }

    /// Value for the `Cookie` request header.
    pub fn header_value(&self) -> &str {
        &self.0
    }

    /// Apply rotated cookies from a later response, replacing pairs by name.
    pub fn merge(&mut self, other: &SessionCredential) {
        for pair in other.pairs() {
            if let Some((name, value)) = pair.split_once('=') {
                self.set(name, value);
            }
        }
    }

    fn pairs(&self) -> impl Iterator<Item = &str> {
        self.0.split("; ").filter(|p| !p.is_empty())
    }

    fn set(&mut self, name: &str, value: &str) {
        let mut pairs: Vec<String> = self
            .pairs()
            .filter(|p| p.split_once('=').map(|(n, _)| n) != Some(name))
            .map(str::to_string)
            .collect();
        pairs.push(format!("{}={}", name, value));
        self.0 = pairs.join("; ");
    }
}

impl std::fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionCredential(<redacted>)")
    }
}

fn cookie_pair(header: &str) -> Option<(&str, &str)> {
    let first = header.split(';').next()?.trim();
    let (name, value) = first.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value.trim()))
}

/// Client-side view of the authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
        /// `None` when the server accepted the login without setting a cookie.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credential: Option<SessionCredential>,
    },
}

impl Session {
    pub fn authenticated(username: impl Into<String>, credential: Option<SessionCredential>) -> Self {
        Session::Authenticated {
            username: username.into(),
            credential,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Session::Authenticated { username, .. } => Some(username),
            Session::Anonymous => None,
        }
    }

    pub fn credential(&self) -> Option<&SessionCredential> {
        match self {
            Session::Authenticated { credential, .. } => credential.as_ref(),
            Session::Anonymous => None,
        }
    }

    /// Fold rotated cookies into an authenticated session. No-op when anonymous.
    pub fn refresh(&mut self, rotated: &SessionCredential) {
        if let Session::Authenticated { credential, .. } = self {
            if let Some(existing) = credential.as_mut() {
                existing.merge(rotated);
            } else {
                *credential = Some(rotated.clone());
            }
        }
    }

    /// Return to `Anonymous`. Reports whether a session was actually cleared.
    pub fn clear(&mut self) -> bool {
        let was_authenticated = self.is_authenticated();
        *self = Session::Anonymous;
        was_authenticated
    }
}
