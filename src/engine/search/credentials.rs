use crate::engine::errors::SearchError;
use crate::gateway::Credential;
use std::sync::Arc;

/// Provider accounts, handed out round-robin at dispatch time.
#[derive(Debug, Clone)]
pub struct CredentialPool {
    keys: Arc<[Credential]>,
}

impl CredentialPool {
    pub fn new(keys: Vec<Credential>) -> Result<Self, SearchError> {
        if keys.is_empty() {
            return Err(SearchError::NoCredentials);
        }
        Ok(Self { keys: keys.into() })
    }

    pub fn from_keys<I, S>(keys: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(keys.into_iter().map(Credential::new).collect())
    }

    pub fn assign(&self, index: usize) -> &Credential {
        &self.keys[index % self.keys.len()]
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }
}
