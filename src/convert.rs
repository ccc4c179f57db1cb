use crate::domain::shell::SolverKwds;
use crate::domain::solver_factory::SolverFactory;
use crate::models::{SolveRequest, SolverListing};

/// Construction keywords for a request. Executable and log file locations
/// are never taken from the wire.
pub fn to_solver_kwds(req: &SolveRequest, keepfiles: bool) -> SolverKwds {
    SolverKwds {
        name: None,
        solver_io: req.solver_io.clone(),
        options: req.options.clone(),
        timelimit: req.timelimit,
        timer: req.timer.clone(),
        executable: None,
        log_file: None,
        keepfiles: keepfiles || req.keepfiles,
    }
}

pub fn to_solver_listings(factory: &SolverFactory) -> Vec<SolverListing> {
    factory
        .plugins()
        .map(|(alias, doc)| SolverListing {
            alias: alias.to_string(),
            doc: doc.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_solver_kwds_merges_keepfiles() {
        let req: SolveRequest = serde_json::from_value(serde_json::json!({
            "solver_io": "mod",
            "options": {"foo": null},
            "problem_files": ["/tmp/model.mod"]
        }))
        .unwrap();

        assert_eq!(req.solver, "mipcl");
        let kwds = to_solver_kwds(&req, true);
        assert_eq!(kwds.solver_io.as_deref(), Some("mod"));
        assert_eq!(kwds.options.get("foo"), Some(None));
        assert!(kwds.keepfiles);
        assert!(kwds.executable.is_none());
        assert!(!to_solver_kwds(&req, false).keepfiles);
    }
}
