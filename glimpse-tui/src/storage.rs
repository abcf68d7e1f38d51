use anyhow::Result;
use std::sync::Mutex;

/// Where the access credential lives between runs
pub trait CredentialStore: Send {
    fn store_credentials(&self, credentials: &str) -> Result<()>;

    fn load_credentials(&self) -> Result<Option<String>>;

    fn clear_credentials(&self) -> Result<()>;
}

/// File-backed store (`~/.glimpse/session`)
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    session_store: crate::session::SessionStore,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self> {
        Ok(Self {
            session_store: crate::session::SessionStore::new()?,
        })
    }

    pub fn with_store(session_store: crate::session::SessionStore) -> Self {
        Self { session_store }
    }
}

impl CredentialStore for FileCredentialStore {
    fn store_credentials(&self, credentials: &str) -> Result<()> {
        self.session_store.save(credentials)
    }

    fn load_credentials(&self) -> Result<Option<String>> {
        self.session_store.load()
    }

    fn clear_credentials(&self) -> Result<()> {
        self.session_store.delete()
    }
}

/// Process-local store, used with `--no-persist`
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credentials: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn store_credentials(&self, credentials: &str) -> Result<()> {
        *self.credentials.lock().map_err(|_| anyhow::anyhow!("credential lock poisoned"))? =
            Some(credentials.to_string());
        Ok(())
    }

    fn load_credentials(&self) -> Result<Option<String>> {
        Ok(self
            .credentials
            .lock()
            .map_err(|_| anyhow::anyhow!("credential lock poisoned"))?
            .clone())
    }

    fn clear_credentials(&self) -> Result<()> {
        *self.credentials.lock().map_err(|_| anyhow::anyhow!("credential lock poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_store(crate::session::SessionStore::at(
            temp_dir.path().join("session"),
        ));

        store.store_credentials("header.payload.sig").unwrap();
        assert_eq!(
            store.load_credentials().unwrap(),
            Some("header.payload.sig".to_string())
        );

        store.clear_credentials().unwrap();
        assert_eq!(store.load_credentials().unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.load_credentials().unwrap(), None);
        store.store_credentials("abc").unwrap();
        assert_eq!(store.load_credentials().unwrap(), Some("abc".to_string()));
        store.clear_credentials().unwrap();
        assert_eq!(store.load_credentials().unwrap(), None);
    }
}
