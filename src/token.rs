// Bearer token persistence. The token is kept as plain text in a single
// file so that every invocation of the CLI can reuse the last login.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default file name, relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "token";

#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token, or `None` when the file is missing,
    /// unreadable or blank.
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => {
                let token = data.trim();
                if token.is_empty() {
                    debug!(path = %self.path.display(), "token file is empty");
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no usable token file");
                None
            }
        }
    }

    /// Overwrite the token file.
    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        debug!(path = %self.path.display(), "token saved");
        Ok(())
    }
}
