use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use lru::LruCache;
use parking_lot::Mutex;

const DEFAULT_CACHE_SIZE: usize = 64;

/// An executable found through the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executable {
    name: String,
    path: PathBuf,
}

impl Executable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_path(&self) -> &Path {
        &self.path
    }
}

/// Register-by-name / lookup-by-name service for solver executables.
///
/// Names resolve either to an explicitly registered path or by searching the
/// configured directories. Search results are cached.
pub struct ExecutableRegistry {
    search_path: Vec<PathBuf>,
    registered: Mutex<HashMap<String, Option<PathBuf>>>,
    resolved: Mutex<LruCache<String, Option<PathBuf>>>,
}

impl ExecutableRegistry {
    pub fn new(search_path: Vec<PathBuf>) -> Self {
        Self::with_cache_size(search_path, DEFAULT_CACHE_SIZE)
    }

    pub fn with_cache_size(search_path: Vec<PathBuf>, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        ExecutableRegistry {
            search_path,
            registered: Mutex::new(HashMap::new()),
            resolved: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Make `name` known to the registry; it resolves through the search path
    pub fn register_executable(&self, name: &str) {
        self.registered
            .lock()
            .entry(name.to_string())
            .or_insert(None);
    }

    /// Register `name` at a fixed location, overriding the search path
    pub fn register_executable_path(&self, name: &str, path: impl Into<PathBuf>) {
        self.registered
            .lock()
            .insert(name.to_string(), Some(path.into()));
        self.resolved.lock().pop(name);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.lock().contains_key(name)
    }

    /// Look up a registered executable. Returns `None` when the name was never
    /// registered or no file can be found for it.
    pub fn registered_executable(&self, name: &str) -> Option<Executable> {
        let explicit = self.registered.lock().get(name).cloned()?;

        let path = match explicit {
            Some(path) => path.is_file().then_some(path),
            None => self.search(name),
        }?;

        Some(Executable {
            name: name.to_string(),
            path,
        })
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        if let Some(cached) = self.resolved.lock().get(name) {
            return cached.clone();
        }

        let found = self
            .search_path
            .iter()
            .flat_map(|dir| candidate_names(name).into_iter().map(move |n| dir.join(n)))
            .find(|candidate| candidate.is_file());

        log::debug!("Resolved executable '{}' to {:?}", name, found);
        self.resolved.lock().put(name.to_string(), found.clone());
        found
    }
}

fn candidate_names(name: &str) -> Vec<String> {
    if cfg!(windows) {
        vec![format!("{}.exe", name), name.to_string()]
    } else {
        vec![name.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_unregistered_name_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("mps_mipcl")).unwrap();

        let registry = ExecutableRegistry::new(vec![dir.path().to_path_buf()]);
        assert!(registry.registered_executable("mps_mipcl").is_none());
    }

    #[test]
    fn test_registered_name_resolves_on_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join(candidate_names("mps_mipcl")[0].clone());
        File::create(&binary).unwrap();

        let registry = ExecutableRegistry::new(vec![dir.path().to_path_buf()]);
        registry.register_executable("mps_mipcl");

        let executable = registry.registered_executable("mps_mipcl").unwrap();
        assert_eq!(executable.name(), "mps_mipcl");
        assert_eq!(executable.get_path(), binary.as_path());
    }

    #[test]
    fn test_registered_name_missing_from_search_path() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ExecutableRegistry::new(vec![dir.path().to_path_buf()]);
        registry.register_executable("mps_mipcl");

        assert!(registry.is_registered("mps_mipcl"));
        assert!(registry.registered_executable("mps_mipcl").is_none());
    }

    #[test]
    fn test_explicit_path_wins_over_cached_search() {
        let search_dir = tempfile::tempdir().unwrap();
        let other_dir = tempfile::tempdir().unwrap();
        let explicit = other_dir.path().join("mipcl-custom");
        File::create(&explicit).unwrap();

        let registry = ExecutableRegistry::new(vec![search_dir.path().to_path_buf()]);
        registry.register_executable("mps_mipcl");
        assert!(registry.registered_executable("mps_mipcl").is_none());

        registry.register_executable_path("mps_mipcl", &explicit);
        let executable = registry.registered_executable("mps_mipcl").unwrap();
        assert_eq!(executable.get_path(), explicit.as_path());
    }
}
