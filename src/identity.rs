//! Identity
//!
//! Who is calling, as far as the storefront cares: a name and whether they
//! are staff. Tokens are opaque; issuing them is someone else's job.

use rustc_hash::FxHashMap;

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Username
    pub username: String,

    /// May manage the catalog
    pub is_staff: bool,
}

/// Maps bearer tokens to identities.
#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    by_token: FxHashMap<String, Identity>,
}

impl UserDirectory {
    /// An empty directory. Nobody can authenticate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `identity` under `token`, replacing any previous holder.
    pub fn insert(&mut self, token: impl Into<String>, identity: Identity) {
        self.by_token.insert(token.into(), identity);
    }

    /// Resolve a bearer token.
    pub fn authenticate(&self, token: &str) -> Option<&Identity> {
        self.by_token.get(token)
    }

    /// Number of registered tokens.
    pub fn len(&self) -> usize {
        self.by_token.len()
    }

    /// Whether no tokens are registered.
    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authenticate_resolves_registered_tokens() {
        let mut users = UserDirectory::new();

        users.insert(
            "s3cret",
            Identity {
                username: "alice".to_string(),
                is_staff: true,
            },
        );

        assert_eq!(
            users.authenticate("s3cret").map(|user| user.username.as_str()),
            Some("alice")
        );
        assert!(users.authenticate("guess").is_none());
        assert_eq!(users.len(), 1);
    }
}
