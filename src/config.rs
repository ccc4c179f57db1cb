use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_JSON_LIMIT: usize = 2 * 1024 * 1024; // 2 MB
const DEFAULT_CACHE_SIZE: usize = 64;

/// Service configuration read from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub json_limit: usize,
    /// Directory temporary log and result files are created in
    pub tmpdir: PathBuf,
    pub keepfiles: bool,
    /// Fixed location of the `mps_mipcl` executable, bypassing the search path
    pub mipcl_executable: Option<PathBuf>,
    pub search_path: Vec<PathBuf>,
    pub cache_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            json_limit: DEFAULT_JSON_LIMIT,
            tmpdir: env::temp_dir(),
            keepfiles: false,
            mipcl_executable: None,
            search_path: Vec::new(),
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let json_limit = env::var("JSON_PAYLOAD_LIMIT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.json_limit);

        let tmpdir = env::var_os("MIPCL_TMPDIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.tmpdir);

        let keepfiles = env::var("MIPCL_KEEPFILES")
            .ok()
            .map(|v| parse_flag(&v))
            .unwrap_or(defaults.keepfiles);

        let mipcl_executable = env::var_os("MIPCL_EXECUTABLE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let search_path = env::var_os("MIPCL_SEARCH_PATH")
            .or_else(|| env::var_os("PATH"))
            .map(|paths| env::split_paths(&paths).collect())
            .unwrap_or_default();

        let cache_size = env::var("MIPCL_CACHE_SIZE")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.cache_size);

        AppConfig {
            port,
            json_limit,
            tmpdir,
            keepfiles,
            mipcl_executable,
            search_path,
            cache_size,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
