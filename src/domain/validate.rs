use std::path::PathBuf;

use crate::error::SolverError;

/// Problem files must be given and must exist
pub fn validate_problem_files(problem_files: &[PathBuf]) -> Result<(), SolverError> {
    if problem_files.is_empty() {
        return Err(SolverError::InvalidInput(
            "At least one problem file is required".to_string(),
        ));
    }

    for file in problem_files {
        if !file.is_file() {
            return Err(SolverError::InvalidInput(format!(
                "Problem file {} does not exist",
                file.display(),
            )));
        }
    }

    Ok(())
}

pub fn validate_timelimit(timelimit: Option<f64>) -> Result<(), SolverError> {
    match timelimit {
        Some(limit) if !limit.is_finite() => Err(SolverError::InvalidInput(format!(
            "Time limit must be a finite number of seconds, got {}",
            limit
        ))),
        _ => Ok(()),
    }
}
