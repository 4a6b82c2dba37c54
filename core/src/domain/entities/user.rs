//! Identity and role entities.

use serde::{Deserialize, Serialize};

/// Authority granted when no explicit roles are assigned
pub const BASELINE_AUTHORITY: &str = "ROLE_USER";

/// Roles attached to an identity
///
/// An identity either carries an explicit, non-empty role list or falls back
/// to the single baseline authority. Roles are resolved once when tokens are
/// minted and embedded in the access token only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum Roles {
    Explicit(Vec<String>),
    #[default]
    DefaultBaseline,
}

impl Roles {
    /// Builds an explicit role set, dropping blank entries
    ///
    /// An empty result is normalised to `DefaultBaseline`.
    pub fn explicit<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let roles: Vec<String> = roles
            .into_iter()
            .map(Into::into)
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        if roles.is_empty() {
            Roles::DefaultBaseline
        } else {
            Roles::Explicit(roles)
        }
    }

    /// Restores roles from a comma-joined `authorities` claim
    ///
    /// A missing or empty claim yields the baseline authority.
    pub fn from_authorities_claim(claim: Option<&str>) -> Self {
        match claim {
            Some(value) => Self::explicit(value.split(',')),
            None => Roles::DefaultBaseline,
        }
    }

    /// Resolved authority names
    pub fn authorities(&self) -> Vec<String> {
        match self {
            Roles::Explicit(roles) => roles.clone(),
            Roles::DefaultBaseline => vec![BASELINE_AUTHORITY.to_string()],
        }
    }

    /// Comma-joined form embedded in access tokens
    pub fn to_authorities_claim(&self) -> String {
        self.authorities().join(",")
    }
}

/// A user as seen by the token lifecycle
///
/// Owned by the user-storage collaborator; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Internal storage key, also the refresh slot owner
    pub id: i64,

    /// Stable identifier assigned by the identity provider
    pub external_id: String,

    pub display_name: String,

    #[serde(default)]
    pub roles: Roles,
}

impl Identity {
    /// Creates an identity with baseline roles
    pub fn new(id: i64, external_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id,
            external_id: external_id.into(),
            display_name: display_name.into(),
            roles: Roles::DefaultBaseline,
        }
    }

    /// Replaces the role set
    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.roles = roles;
        self
    }
}
