use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Hands out uniquely named scratch files and removes them again.
pub struct TempfileManager {
    dir: PathBuf,
    created: Mutex<Vec<PathBuf>>,
}

impl TempfileManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TempfileManager {
            dir: dir.into(),
            created: Mutex::new(Vec::new()),
        }
    }

    /// Create an empty file with a unique name ending in `suffix`
    pub fn create_tempfile(&self, suffix: &str) -> io::Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("tmp")
            .suffix(suffix)
            .tempfile_in(&self.dir)?;
        let path = file.into_temp_path().keep().map_err(|e| e.error)?;

        log::debug!("Created temporary file {}", path.display());
        self.created.lock().push(path.clone());
        Ok(path)
    }

    /// Delete a file handed out by this manager. Unknown paths are left alone.
    pub fn release(&self, path: &Path) -> io::Result<()> {
        let mut created = self.created.lock();
        let Some(index) = created.iter().position(|p| p == path) else {
            return Ok(());
        };
        created.swap_remove(index);
        remove_if_present(path)
    }

    /// Stop tracking a file without deleting it
    pub fn forget(&self, path: &Path) {
        self.created.lock().retain(|p| p != path);
    }

    /// Delete every file still held by this manager
    pub fn clear(&self) -> io::Result<()> {
        let paths: Vec<PathBuf> = self.created.lock().drain(..).collect();
        for path in &paths {
            remove_if_present(path)?;
        }
        Ok(())
    }

    pub fn tracked(&self) -> usize {
        self.created.lock().len()
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
