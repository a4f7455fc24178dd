//! Credential keys.

use std::fmt;

use serde::Serialize;

/// Sign-in credentials for one account in one study.
///
/// Equality and hashing are by value, so two `SignIn`s built from the same
/// study, email and password name the same cache entry.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use bridge_rest::SignIn;
///
/// let signin = SignIn::new("api", "alice@example.org", "P4ssword");
/// assert_eq!(signin.email(), "alice@example.org");
/// assert!(!format!("{signin:?}").contains("P4ssword"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SignIn {
    study: String,
    email: String,
    password: String,
}

impl SignIn {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `study` - The study identifier the account belongs to
    /// * `email` - The account email
    /// * `password` - The account password
    pub fn new(
        study: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            study: study.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Returns the study identifier.
    pub fn study(&self) -> &str {
        &self.study
    }

    /// Returns the account email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for SignIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignIn")
            .field("study", &self.study)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Who a request is made as: nobody, or a signed-in account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CredentialKey {
    Anonymous,
    SignedIn(SignIn),
}

impl CredentialKey {
    /// Returns the sign-in credentials, or `None` for anonymous keys.
    pub fn sign_in(&self) -> Option<&SignIn> {
        match self {
            CredentialKey::Anonymous => None,
            CredentialKey::SignedIn(signin) => Some(signin),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, CredentialKey::Anonymous)
    }
}

impl From<SignIn> for CredentialKey {
    fn from(signin: SignIn) -> Self {
        CredentialKey::SignedIn(signin)
    }
}

impl From<Option<SignIn>> for CredentialKey {
    fn from(signin: Option<SignIn>) -> Self {
        signin.map_or(CredentialKey::Anonymous, CredentialKey::SignedIn)
    }
}

impl fmt::Display for CredentialKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialKey::Anonymous => write!(f, "anonymous"),
            CredentialKey::SignedIn(signin) => write!(f, "{}/{}", signin.study, signin.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sign_in_hides_password_in_debug() {
        let signin = SignIn::new("api", "alice@example.org", "secret123");
        let debug = format!("{:?}", signin);
        assert!(debug.contains("alice@example.org"));
        assert!(!debug.contains("secret123"));
        assert!(debug.contains("[REDACTED]"));

        let key = CredentialKey::from(signin);
        assert!(!format!("{key:?}").contains("secret123"));
        assert!(!key.to_string().contains("secret123"));
    }

    #[test]
    fn keys_compare_by_value() {
        let a = CredentialKey::from(SignIn::new("api", "alice@example.org", "pw"));
        let b = CredentialKey::from(SignIn::new("api", "alice@example.org", "pw"));
        let c = CredentialKey::from(SignIn::new("api", "alice@example.org", "other"));

        let set: HashSet<_> = [a.clone(), b, c, CredentialKey::Anonymous].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&a));
    }

    #[test]
    fn none_maps_to_anonymous() {
        assert!(CredentialKey::from(None).is_anonymous());
        assert!(CredentialKey::Anonymous.sign_in().is_none());
    }

    #[test]
    fn serializes_wire_body() {
        let signin = SignIn::new("api", "alice@example.org", "pw");
        let json = serde_json::to_value(&signin).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"study": "api", "email": "alice@example.org", "password": "pw"})
        );
    }
}
