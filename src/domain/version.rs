use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"[0-9]+(\.[0-9]+){1,3}").unwrap();
}

/// A solver executable version, padded to four components, or unknown
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverVersion(Option<[u32; 4]>);

impl SolverVersion {
    pub fn unknown() -> Self {
        SolverVersion(None)
    }

    pub fn is_known(&self) -> bool {
        self.0.is_some()
    }

    pub fn components(&self) -> Option<[u32; 4]> {
        self.0
    }
}

impl fmt::Display for SolverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some([a, b, c, d]) => write!(f, "{}.{}.{}.{}", a, b, c, d),
            None => f.write_str("unknown"),
        }
    }
}

/// Pull the first dotted version number out of solver output
pub fn extract_version(text: &str) -> SolverVersion {
    let Some(found) = VERSION_RE.find(text) else {
        return SolverVersion::unknown();
    };

    let mut components = [0u32; 4];
    for (slot, part) in components.iter_mut().zip(found.as_str().split('.')) {
        match part.parse() {
            Ok(value) => *slot = value,
            Err(_) => return SolverVersion::unknown(),
        }
    }
    SolverVersion(Some(components))
}
