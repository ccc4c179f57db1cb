use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::formats::{ProblemFormat, ResultsFormat};
use crate::domain::results::SolverResults;
use crate::domain::shell::{path_arg, Capabilities, CommandDescriptor, ShellState, SolverKwds};
use crate::domain::solver::ShellSolver;
use crate::domain::version::{extract_version, SolverVersion};
use crate::error::Result;
use crate::services::Services;

/// Registry name of the MIPCL command-line driver
pub const MIPCL_EXECUTABLE: &str = "mps_mipcl";

const LOG_SUFFIX: &str = ".mipcl.log";

/// Shell interface to the MIPCL LP/MIP solver
pub struct MipclShell {
    state: ShellState,
    version: Option<SolverVersion>,
}

impl MipclShell {
    pub fn new(services: Services, version: Option<SolverVersion>, kwds: SolverKwds) -> Result<Self> {
        let mut state = ShellState::new("mipcl", services, kwds)?;
        state.valid_problem_formats = vec![ProblemFormat::Mps, ProblemFormat::Mod];
        state.valid_result_formats = HashMap::from([
            (ProblemFormat::Mps, ResultsFormat::Soln),
            (ProblemFormat::Mod, ResultsFormat::Soln),
        ]);
        state.capabilities = Capabilities {
            linear: true,
            integer: true,
        };
        state.set_problem_format(ProblemFormat::Mps)?;

        Ok(MipclShell { state, version })
    }
}

impl ShellSolver for MipclShell {
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ShellState {
        &mut self.state
    }

    fn executable_name(&self) -> &str {
        MIPCL_EXECUTABLE
    }

    fn default_executable(&mut self) -> Option<PathBuf> {
        match self.state.services.registry.registered_executable(MIPCL_EXECUTABLE) {
            Some(executable) => Some(executable.get_path().to_path_buf()),
            None => {
                log::warn!(
                    "Could not locate the '{}' executable, which is required for solver '{}'",
                    MIPCL_EXECUTABLE,
                    self.state.name
                );
                self.state.enabled = false;
                None
            }
        }
    }

    fn default_results_format(&self, _format: ProblemFormat) -> Option<ResultsFormat> {
        Some(ResultsFormat::Soln)
    }

    fn create_command_line(
        &mut self,
        executable: &Path,
        _problem_files: &[PathBuf],
    ) -> Result<CommandDescriptor> {
        if self.state.log_file.is_none() {
            self.state.log_file = Some(self.state.new_tempfile(LOG_SUFFIX)?);
        }

        self.state.soln_file = None;

        let mut cmd = vec![path_arg(executable)];
        if let Some(timer) = &self.state.timer {
            cmd.insert(0, timer.clone());
        }
        for (name, value) in self.state.options.iter() {
            match value.filter(|v| !v.trim().is_empty()) {
                Some(value) => cmd.extend([format!("--{}", name), value.to_string()]),
                None => cmd.push(format!("--{}", name)),
            }
        }

        if let Some(limit) = self.state.effective_timelimit() {
            cmd.extend(["-time".to_string(), limit.to_string()]);
        }

        Ok(CommandDescriptor {
            cmd,
            log_file: self.state.log_file.clone(),
            env: None,
        })
    }

    // MIPCL output is not parsed; callers get an empty result.
    fn process_logfile(&mut self) -> Result<SolverResults> {
        Ok(SolverResults::new())
    }

    fn process_soln_file(&mut self, _results: &mut SolverResults) -> Result<()> {
        Ok(())
    }

    fn get_version(&self) -> SolverVersion {
        self.version.unwrap_or_else(|| extract_version(""))
    }
}
