use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::formats::{ProblemFormat, ResultsFormat};
use crate::domain::results::SolverResults;
use crate::domain::shell::{path_arg, Capabilities, CommandDescriptor, ShellState, SolverKwds};
use crate::domain::solver::ShellSolver;
use crate::error::{Result, SolverError};
use crate::services::Services;

/// Registry name of the Optimization Services driver
pub const OS_EXECUTABLE: &str = "OSSolverService";

const LOG_SUFFIX: &str = ".os.log";
const RESULTS_SUFFIX: &str = ".osrl";

/// Shell interface to OSSolverService.
///
/// The backend is picked with the `solver` option, e.g. `solver=mps_mipcl`.
/// OSrL output is not parsed.
pub struct OsShell {
    state: ShellState,
}

impl OsShell {
    pub fn new(services: Services, kwds: SolverKwds) -> Result<Self> {
        let mut state = ShellState::new("os", services, kwds)?;
        state.valid_problem_formats = vec![ProblemFormat::Osil, ProblemFormat::Mps];
        state.valid_result_formats = HashMap::from([
            (ProblemFormat::Osil, ResultsFormat::Osrl),
            (ProblemFormat::Mps, ResultsFormat::Osrl),
        ]);
        state.capabilities = Capabilities {
            linear: true,
            integer: true,
        };
        state.set_problem_format(ProblemFormat::Osil)?;

        Ok(OsShell { state })
    }
}

impl ShellSolver for OsShell {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn executable_name(&self) -> &str {
        OS_EXECUTABLE
    }

    fn default_executable(&mut self) -> Option<PathBuf> {
        match self.state.services.registry.registered_executable(OS_EXECUTABLE) {
            Some(executable) => Some(executable.get_path().to_path_buf()),
            None => {
                log::warn!(
                    "Could not locate the '{}' executable, which is required for solver '{}'",
                    OS_EXECUTABLE,
                    self.state.name
                );
                self.state.enabled = false;
                None
            }
        }
    }

    fn create_command_line(
        &mut self,
        executable: &Path,
        problem_files: &[PathBuf],
    ) -> Result<CommandDescriptor> {
        let problem = problem_files.first().ok_or_else(|| {
            SolverError::InvalidInput(format!("Solver ({}) needs a problem file", self.state.name))
        })?;

        if self.state.log_file.is_none() {
            self.state.log_file = Some(self.state.new_tempfile(LOG_SUFFIX)?);
        }
        let results_file = self.state.new_tempfile(RESULTS_SUFFIX)?;
        self.state.results_file = Some(results_file.clone());

        let input_flag = match self.state.problem_format {
            Some(ProblemFormat::Mps) => "-mps",
            _ => "-osil",
        };

        let mut cmd = vec![path_arg(executable)];
        if let Some(timer) = &self.state.timer {
            cmd.insert(0, timer.clone());
        }
        cmd.extend([
            input_flag.to_string(),
            path_arg(problem),
            "-osrl".to_string(),
            path_arg(&results_file),
        ]);
        for (name, value) in self.state.options.iter() {
            cmd.push(format!("-{}", name));
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                cmd.push(value.to_string());
            }
        }

        Ok(CommandDescriptor {
            cmd,
            log_file: self.state.log_file.clone(),
            env: None,
        })
    }

    fn process_logfile(&mut self) -> Result<SolverResults> {
        Ok(SolverResults::new())
    }

    fn process_soln_file(&mut self, _results: &mut SolverResults) -> Result<()> {
        Ok(())
    }
}
