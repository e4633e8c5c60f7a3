//! Session credentials for one export run

use std::fmt;

/// Session token, anti-forgery token and username of the exporting account
///
/// Built once at startup and passed by reference into every request; never
/// mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    session_token: String,
    csrf_token: String,
}

impl Credentials {
    pub fn new(
        username: impl Into<String>,
        session_token: impl Into<String>,
        csrf_token: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            session_token: session_token.into(),
            csrf_token: csrf_token.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    pub fn csrf_token(&self) -> &str {
        &self.csrf_token
    }

    /// Value for the `Cookie` header
    pub fn cookie_header(&self) -> String {
        format!(
            "LEETCODE_SESSION={}; csrftoken={}",
            self.session_token, self.csrf_token
        )
    }

    /// Checks that every value is non-empty and usable inside an HTTP header
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("username", &self.username),
            ("session", &self.session_token),
            ("csrf token", &self.csrf_token),
        ] {
            if value.is_empty() {
                return Err(format!("{} cannot be empty", name));
            }
            if !value.chars().all(|c| c.is_ascii_graphic()) {
                return Err(format!(
                    "{} must contain only visible ASCII characters",
                    name
                ));
            }
        }
        Ok(())
    }
}

// Tokens stay out of logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("session_token", &"<redacted>")
            .field("csrf_token", &"<redacted>")
            .finish()
    }
}
