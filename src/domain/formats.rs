use std::fmt;

use serde::{Deserialize, Serialize};

/// File formats a problem instance can be handed to a solver in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProblemFormat {
    Mps,
    /// Algebraic model file
    Mod,
    CpxLp,
    Nl,
    Osil,
}

/// File formats a solver writes its answer in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ResultsFormat {
    Soln,
    Osrl,
}

impl ProblemFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemFormat::Mps => "mps",
            ProblemFormat::Mod => "mod",
            ProblemFormat::CpxLp => "cpxlp",
            ProblemFormat::Nl => "nl",
            ProblemFormat::Osil => "osil",
        }
    }
}

impl fmt::Display for ProblemFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ResultsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResultsFormat::Soln => "soln",
            ResultsFormat::Osrl => "osrl",
        };
        f.write_str(name)
    }
}
