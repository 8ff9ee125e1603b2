//! On-disk layout of a vault directory and the atomic file writer.
//!
//! ```text
//! <dir>/master.key      base64(salt || derived hash), UTF-8 text
//! <dir>/secret.key      raw 32-byte vault key
//! <dir>/passwords.enc   MAC(32) || IV(16) || AES-256-CBC ciphertext
//! <dir>/settings.json   plaintext user preferences
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::Result;

pub const MASTER_KEY_FILE: &str = "master.key";
pub const SECRET_KEY_FILE: &str = "secret.key";
pub const PASSWORDS_FILE: &str = "passwords.enc";
pub const SETTINGS_FILE: &str = "settings.json";

/// Fixed file paths inside one vault directory.
#[derive(Debug, Clone)]
pub struct VaultLayout {
    dir: PathBuf,
}

impl VaultLayout {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn master_key(&self) -> PathBuf {
        self.dir.join(MASTER_KEY_FILE)
    }

    pub fn secret_key(&self) -> PathBuf {
        self.dir.join(SECRET_KEY_FILE)
    }

    pub fn passwords(&self) -> PathBuf {
        self.dir.join(PASSWORDS_FILE)
    }

    pub fn settings(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE)
    }

    /// Create the vault directory (and parents) if needed.
    pub fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

/// Replace the contents of `path` **atomically**.
///
/// 1. Write the bytes to a temp file in the same directory.
/// 2. Flush them to disk.
/// 3. Rename the temp file over the target path.
///
/// Readers see either the old file or the new one, never a partial write.
/// On Unix the file is created with owner-only permissions.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = write_synced(&tmp_path, contents).and_then(|()| {
        fs::rename(&tmp_path, path)?;
        Ok(())
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()?;
    Ok(())
}
