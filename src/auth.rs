/// Holds the OAuth2 bearer token attached to every request.
///
/// Acquiring the token is up to the caller; the client only carries it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Authentication {
    token: String,
}

impl Authentication {
    pub(crate) fn set_token(&mut self, token: String) {
        self.token = token;
    }

    /// Whether a non-empty token is set.
    pub fn has_auth(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn bearer(&self) -> Option<String> {
        self.has_auth().then(|| format!("Bearer {}", self.token))
    }
}

// Keeps the token out of debug logs.
impl std::fmt::Debug for Authentication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authentication")
            .field("token", &if self.has_auth() { "<token>" } else { "" })
            .finish()
    }
}
