use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::domain::formats::{ProblemFormat, ResultsFormat};
use crate::domain::options::SolverOptions;
use crate::error::{Result, SolverError};
use crate::services::Services;

/// Keywords a solver plugin is constructed with
#[derive(Debug, Clone, Default)]
pub struct SolverKwds {
    pub name: Option<String>,
    /// Selects the delegate; consumed by dispatchers, ignored by shell adapters
    pub solver_io: Option<String>,
    pub options: SolverOptions,
    /// Wall clock limit in seconds, forwarded to the solver
    pub timelimit: Option<f64>,
    /// Program prepended to the command line, e.g. `time`
    pub timer: Option<String>,
    /// Explicit executable, bypassing the registry
    pub executable: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub keepfiles: bool,
}

/// An invocable command: argv, log file and environment override
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    pub cmd: Vec<String>,
    pub log_file: Option<PathBuf>,
    pub env: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutput {
    pub return_code: i32,
    pub log: String,
}

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub linear: bool,
    pub integer: bool,
}

impl Capabilities {
    pub fn has(&self, name: &str) -> bool {
        match name {
            "linear" => self.linear,
            "integer" => self.integer,
            _ => false,
        }
    }
}

/// State shared by every adapter that drives an external executable
pub struct ShellState {
    pub name: String,
    pub solver_type: String,
    pub services: Services,
    pub options: SolverOptions,
    pub problem_format: Option<ProblemFormat>,
    pub results_format: Option<ResultsFormat>,
    pub valid_problem_formats: Vec<ProblemFormat>,
    pub valid_result_formats: HashMap<ProblemFormat, ResultsFormat>,
    pub capabilities: Capabilities,
    pub timer: Option<String>,
    pub timelimit: Option<f64>,
    pub log_file: Option<PathBuf>,
    pub soln_file: Option<PathBuf>,
    pub results_file: Option<PathBuf>,
    /// Cleared when the executable cannot be found
    pub enabled: bool,
    pub user_executable: Option<PathBuf>,
    pub keepfiles: bool,
    created: Vec<PathBuf>,
}

impl ShellState {
    /// Fails with `SolverError::Application` when an explicit executable was
    /// given but does not exist.
    pub fn new(solver_type: &str, services: Services, kwds: SolverKwds) -> Result<Self> {
        if let Some(executable) = &kwds.executable {
            if !executable.is_file() {
                return Err(SolverError::Application(format!(
                    "Executable '{}' for solver '{}' does not exist",
                    executable.display(),
                    solver_type
                )));
            }
        }

        Ok(ShellState {
            name: kwds.name.unwrap_or_else(|| solver_type.to_string()),
            solver_type: solver_type.to_string(),
            services,
            options: kwds.options,
            problem_format: None,
            results_format: None,
            valid_problem_formats: Vec::new(),
            valid_result_formats: HashMap::new(),
            capabilities: Capabilities::default(),
            timer: kwds.timer.filter(|t| !t.trim().is_empty()),
            timelimit: kwds.timelimit,
            log_file: kwds.log_file,
            soln_file: None,
            results_file: None,
            enabled: true,
            user_executable: kwds.executable,
            keepfiles: kwds.keepfiles,
            created: Vec::new(),
        })
    }

    pub fn set_problem_format(&mut self, format: ProblemFormat) -> Result<()> {
        if !self.valid_problem_formats.contains(&format) {
            return Err(SolverError::UnsupportedFormat {
                solver: self.name.clone(),
                format,
            });
        }
        self.problem_format = Some(format);
        self.results_format = self.valid_result_formats.get(&format).copied();
        Ok(())
    }

    /// A positive time limit, if one was requested
    pub fn effective_timelimit(&self) -> Option<f64> {
        self.timelimit.filter(|limit| *limit > 0.0)
    }

    /// Request a scratch file that is removed again by `cleanup`
    pub fn new_tempfile(&mut self, suffix: &str) -> Result<PathBuf> {
        let path = self.services.tempfiles.create_tempfile(suffix)?;
        self.created.push(path.clone());
        Ok(path)
    }

    /// Remove scratch files created for the last call unless `keepfiles` is set
    pub fn cleanup(&mut self) {
        if self.keepfiles {
            if !self.created.is_empty() {
                log::info!("Keeping solver files: {:?}", self.created);
            }
            for path in self.created.drain(..) {
                self.services.tempfiles.forget(&path);
            }
            return;
        }

        for path in self.created.drain(..) {
            if let Err(e) = self.services.tempfiles.release(&path) {
                log::warn!("Failed to remove {}: {}", path.display(), e);
            }
            for slot in [&mut self.log_file, &mut self.soln_file, &mut self.results_file] {
                if slot.as_deref() == Some(path.as_path()) {
                    *slot = None;
                }
            }
        }
    }
}

impl Drop for ShellState {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Launch the command and capture its output into the log file.
pub fn run_command(command: &CommandDescriptor) -> Result<ExecutionOutput> {
    let (program, args) = command
        .cmd
        .split_first()
        .ok_or_else(|| SolverError::InvalidInput("empty command line".to_string()))?;

    let mut process = Command::new(program);
    process.args(args);
    if let Some(env) = &command.env {
        process.envs(env);
    }

    log::debug!("Running {:?}", command.cmd);
    let output = process.output()?;

    let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
    log.push_str(&String::from_utf8_lossy(&output.stderr));

    if let Some(path) = &command.log_file {
        fs::write(path, &log)?;
    }

    Ok(ExecutionOutput {
        // Killed by a signal
        return_code: output.status.code().unwrap_or(-1),
        log,
    })
}

pub fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
