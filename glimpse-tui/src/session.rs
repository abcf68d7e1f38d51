use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use glimpse_types::SessionUser;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Claims we read from the credential payload. Unknown claims are ignored.
#[derive(Debug, Deserialize)]
struct CredentialClaims {
    #[serde(alias = "_id", alias = "sub")]
    id: String,
    username: String,
    #[serde(default)]
    email: Option<String>,
}

/// Decode the user out of a JWT-style credential without verifying it.
///
/// Only the payload segment is read; signature checks are the backend's job.
pub fn decode_credential(token: &str) -> Result<SessionUser> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow!("Invalid credential format"));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .context("Failed to decode credential payload")?;

    let claims: CredentialClaims =
        serde_json::from_slice(&payload).context("Failed to parse credential claims")?;

    Ok(SessionUser {
        id: claims.id,
        username: claims.username,
        email: claims.email,
    })
}

/// The viewer's session, passed explicitly to every view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<SessionUser>,
    token: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from a stored or supplied credential.
    /// An undecodable credential yields an anonymous session.
    pub fn from_credential(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::anonymous();
        };

        match decode_credential(token) {
            Ok(user) => Self {
                user: Some(user),
                token: Some(token.trim().to_string()),
            },
            Err(e) => {
                log::warn!("Ignoring credential that could not be decoded: {:#}", e);
                Self::anonymous()
            }
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Stores the credential in `~/.glimpse/session` with 0600 permissions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    file_path: PathBuf,
}

impl SessionStore {
    pub fn new() -> Result<Self> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;
        Ok(Self::at(home_dir.join(".glimpse").join("session")))
    }

    pub fn at(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Loads the credential.
    ///
    /// Missing, empty or obviously corrupted files read as no credential.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.file_path).context("Failed to read session file")?;
        let token = content.trim();

        if token.is_empty() {
            log::warn!("Session file is empty, treating as no session");
            return Ok(None);
        }

        if token.len() < 8 || token.len() > 4096 {
            log::warn!("Stored credential has invalid length: {}, treating as corrupted", token.len());
            return Ok(None);
        }

        if token.chars().any(|c| c.is_control()) {
            log::warn!("Session file contains control characters, treating as corrupted");
            return Ok(None);
        }

        log::debug!("Loaded credential from {}", self.file_path.display());
        Ok(Some(token.to_string()))
    }

    /// Atomically writes the credential and restricts it to the owner.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).context("Failed to create .glimpse directory")?;
        }

        let temp_path = self.file_path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).context("Failed to create temporary session file")?;
        file.write_all(token.as_bytes())
            .context("Failed to write credential")?;
        file.sync_all().context("Failed to sync session file to disk")?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp_path, fs::Permissions::from_mode(0o600))
                .context("Failed to set session file permissions")?;
        }

        fs::rename(&temp_path, &self.file_path).context("Failed to rename temporary session file")?;

        log::info!("Saved credential to {}", self.file_path.display());
        Ok(())
    }

    pub fn delete(&self) -> Result<()> {
        if self.file_path.exists() {
            fs::remove_file(&self.file_path).context("Failed to delete session file")?;
            log::info!("Deleted credential at {}", self.file_path.display());
        }
        Ok(())
    }

    pub fn path(&self) -> &PathBuf {
        &self.file_path
    }
}
