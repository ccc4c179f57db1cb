use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::options::SolverOptions;
use crate::domain::results::SolverResults;

// ---------- API (wire) types: owned & serde-friendly ----------

fn default_solver() -> String {
    "mipcl".to_string()
}

#[derive(Deserialize, Debug, Clone)]
pub struct SolveRequest {
    #[serde(default = "default_solver")]
    pub solver: String,
    pub solver_io: Option<String>,
    #[serde(default)]
    pub options: SolverOptions,
    pub timelimit: Option<f64>,
    pub timer: Option<String>,
    #[serde(default)]
    pub keepfiles: bool,
    pub problem_files: Vec<PathBuf>,
}

#[derive(Serialize)]
pub struct SolveResponse {
    pub results: SolverResults,
}

#[derive(Serialize)]
pub struct SolverListing {
    pub alias: String,
    pub doc: String,
}

#[derive(Serialize)]
pub struct SolverListResponse {
    pub solvers: Vec<SolverListing>,
}
