//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use super::password::{CredentialHasher, Password};
use crate::config::{
    MSG_INVALID_EMAIL, MSG_REQUIRED_EMAIL, MSG_REQUIRED_NICKNAME, MSG_REQUIRED_PASSWORD,
};
use crate::errors::AppResult;

/// Which operation a draft is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Create,
    Update,
    Login,
}

/// Rules applied for a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub nickname_required: bool,
    pub password_required: bool,
    pub email_required: bool,
    pub email_well_formed: bool,
}

impl ValidationMode {
    /// Rule table
    pub const fn rules(self) -> ValidationRules {
        match self {
            ValidationMode::Create | ValidationMode::Update => ValidationRules {
                nickname_required: true,
                password_required: true,
                email_required: true,
                email_well_formed: true,
            },
            ValidationMode::Login => ValidationRules {
                nickname_required: false,
                password_required: true,
                email_required: true,
                email_well_formed: true,
            },
        }
    }
}

impl From<&str> for ValidationMode {
    /// Unknown names fall back to `Create`.
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "update" => ValidationMode::Update,
            "login" => ValidationMode::Login,
            _ => ValidationMode::Create,
        }
    }
}

/// Persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub nickname: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Stored password as a value object
    pub fn password(&self) -> Password {
        Password::from_hash(self.password_hash.clone())
    }
}

/// Candidate user record, as received from a caller.
///
/// `password` holds the raw secret until `hash_password` replaces it.
#[derive(Clone, Default, Deserialize)]
pub struct UserDraft {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    password: String,
    #[serde(skip)]
    password_hashed: bool,
    #[serde(skip)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserDraft")
            .field("id", &self.id)
            .field("nickname", &self.nickname)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("password_hashed", &self.password_hashed)
            .finish()
    }
}

impl UserDraft {
    pub fn new(
        nickname: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// Draft carrying only what a login needs.
    pub fn credentials(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self::new(String::new(), email, password)
    }

    /// Current password value: raw until hashed, the PHC string after.
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_password_hashed(&self) -> bool {
        self.password_hashed
    }

    /// Replace the raw password. Clears the hashed marker.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.password_hashed = false;
    }

    /// Trim and HTML-escape the free-text fields.
    pub fn sanitize(&mut self) {
        self.nickname = sanitize(&self.nickname);
        self.email = sanitize(&self.email);
    }

    /// Normalize a draft before insert: drop any caller-supplied id,
    /// sanitize, and stamp both timestamps with the current time.
    pub fn prepare(&mut self) {
        let now = Utc::now();
        self.id = None;
        self.sanitize();
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    /// Run every rule of `mode` and collect one message per failure.
    pub fn validate(&self, mode: ValidationMode) -> Vec<String> {
        let rules = mode.rules();
        let mut errors = Vec::new();

        if rules.nickname_required && self.nickname.is_empty() {
            errors.push(MSG_REQUIRED_NICKNAME.to_string());
        }
        if rules.password_required && self.password.is_empty() {
            errors.push(MSG_REQUIRED_PASSWORD.to_string());
        }
        if rules.email_required && self.email.is_empty() {
            errors.push(MSG_REQUIRED_EMAIL.to_string());
        }
        if rules.email_well_formed && !self.email.validate_email() {
            errors.push(MSG_INVALID_EMAIL.to_string());
        }

        errors
    }

    /// Hash the raw password in place. A draft is hashed at most once;
    /// later calls return the existing hash.
    pub fn hash_password(&mut self, hasher: &CredentialHasher) -> AppResult<&str> {
        if !self.password_hashed {
            self.password = hasher.hash(&self.password)?.into_string();
            self.password_hashed = true;
        }
        Ok(&self.password)
    }
}

/// Trim surrounding whitespace, then escape `& ' < > "`.
pub fn sanitize(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HashConfig;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(&HashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  ann "), "ann");
        assert_eq!(
            sanitize("<b>\"tom\" & 'jerry'</b>"),
            "&lt;b&gt;&#34;tom&#34; &amp; &#39;jerry&#39;&lt;/b&gt;"
        );
        assert_eq!(sanitize("   "), "");
    }

    #[test]
    fn test_prepare_resets_id_and_stamps_times() {
        let mut draft = UserDraft::new(" ann ", " ann@example.com\n", "secret123");
        draft.id = Some(42);

        draft.prepare();

        assert_eq!(draft.id, None);
        assert_eq!(draft.nickname, "ann");
        assert_eq!(draft.email, "ann@example.com");
        assert!(draft.created_at.is_some());
        assert_eq!(draft.created_at, draft.updated_at);
        // Password is left untouched by prepare
        assert_eq!(draft.password(), "secret123");
    }

    #[test]
    fn test_valid_draft_passes_every_mode() {
        let draft = UserDraft::new("ann", "ann@example.com", "secret123");

        assert!(draft.validate(ValidationMode::Create).is_empty());
        assert!(draft.validate(ValidationMode::Update).is_empty());
        assert!(draft.validate(ValidationMode::Login).is_empty());
    }

    #[test]
    fn test_login_never_requires_nickname() {
        let draft = UserDraft::credentials("ann@example.com", "secret123");

        assert!(draft.validate(ValidationMode::Login).is_empty());
        assert_eq!(
            draft.validate(ValidationMode::Create),
            vec![MSG_REQUIRED_NICKNAME.to_string()]
        );
        assert_eq!(
            draft.validate(ValidationMode::Update),
            vec![MSG_REQUIRED_NICKNAME.to_string()]
        );
    }

    #[test]
    fn test_update_collects_one_message_per_failed_rule() {
        let draft = UserDraft::new("", "not-an-email", "");

        let errors = draft.validate(ValidationMode::Update);

        assert_eq!(
            errors,
            vec![
                MSG_REQUIRED_NICKNAME.to_string(),
                MSG_REQUIRED_PASSWORD.to_string(),
                MSG_INVALID_EMAIL.to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_email_fails_both_email_rules() {
        let draft = UserDraft::credentials("", "secret123");

        assert_eq!(
            draft.validate(ValidationMode::Login),
            vec![MSG_REQUIRED_EMAIL.to_string(), MSG_INVALID_EMAIL.to_string()]
        );
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!(ValidationMode::from("UPDATE"), ValidationMode::Update);
        assert_eq!(ValidationMode::from("login"), ValidationMode::Login);
        assert_eq!(ValidationMode::from(""), ValidationMode::Create);
        assert_eq!(ValidationMode::from("anything"), ValidationMode::Create);
    }

    #[test]
    fn test_hash_password_applies_once() {
        let hasher = hasher();
        let mut draft = UserDraft::new("ann", "ann@example.com", "secret123");

        let first = draft.hash_password(&hasher).unwrap().to_string();
        let second = draft.hash_password(&hasher).unwrap().to_string();

        assert_ne!(first, "secret123");
        assert_eq!(first, second);
        assert!(draft.is_password_hashed());
        assert!(Password::from_hash(first).verify("secret123"));
    }

    #[test]
    fn test_set_password_rearms_hashing() {
        let hasher = hasher();
        let mut draft = UserDraft::new("ann", "ann@example.com", "secret123");
        draft.hash_password(&hasher).unwrap();

        draft.set_password("another-secret");
        assert!(!draft.is_password_hashed());

        let hash = draft.hash_password(&hasher).unwrap().to_string();
        assert!(Password::from_hash(hash).verify("another-secret"));
    }

    #[test]
    fn test_draft_deserializes_with_missing_fields() {
        let draft: UserDraft =
            serde_json::from_str(r#"{"email":"ann@example.com","password":"pw"}"#).unwrap();

        assert_eq!(draft.nickname, "");
        assert_eq!(draft.password(), "pw");
        assert!(!draft.is_password_hashed());
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let now = Utc::now();
        let user = User {
            id: 1,
            nickname: "ann".to_string(),
            email: "ann@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("argon2"));
        assert_eq!(json["nickname"], "ann");
        assert_eq!(json["id"], 1);
    }

    #[test]
    fn test_draft_debug_redacts_password() {
        let draft = UserDraft::new("ann", "ann@example.com", "secret123");
        assert!(!format!("{:?}", draft).contains("secret123"));
    }
}
