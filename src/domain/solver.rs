use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::domain::formats::{ProblemFormat, ResultsFormat};
use crate::domain::options::SolverOptions;
use crate::domain::results::SolverResults;
use crate::domain::shell::{run_command, CommandDescriptor, ExecutionOutput, ShellState};
use crate::domain::version::SolverVersion;
use crate::error::{Result, SolverError};

/// Common interface for solver plugins handed out by the factory
pub trait Solver: Send {
    /// Get the solver name for logging/debugging
    fn name(&self) -> &str;

    fn solver_type(&self) -> &str;

    /// Whether the solver can run. With `exception_flag` an unavailable
    /// solver is reported as `SolverError::Unavailable` instead of `false`.
    fn available(&mut self, exception_flag: bool) -> Result<bool>;

    fn problem_format(&self) -> Option<ProblemFormat>;

    fn results_format(&self) -> Option<ResultsFormat>;

    fn set_problem_format(&mut self, format: ProblemFormat) -> Result<()>;

    fn options(&self) -> &SolverOptions;

    /// Apply whitespace separated `name=value` assignments to the options
    fn set_options(&mut self, assignments: &str);

    fn has_capability(&self, name: &str) -> bool;

    fn version(&self) -> SolverVersion;

    /// Build the command that `solve` would run, without running it
    fn create_command(&mut self, problem_files: &[PathBuf]) -> Result<CommandDescriptor>;

    /// Run the solver on problem files written by the caller
    fn solve(&mut self, problem_files: &[PathBuf]) -> Result<SolverResults>;
}

/// Hooks of an adapter that drives an external executable.
///
/// Every `ShellSolver` is a `Solver`; the shared flow lives in the blanket
/// implementation below.
pub trait ShellSolver: Send {
    fn state(&self) -> &ShellState;

    fn state_mut(&mut self) -> &mut ShellState;

    /// Registry name of the executable this adapter needs
    fn executable_name(&self) -> &str;

    /// Locate the executable when the caller did not name one
    fn default_executable(&mut self) -> Option<PathBuf>;

    fn executable(&mut self) -> Option<PathBuf> {
        match self.state().user_executable.clone() {
            Some(path) => Some(path),
            None => self.default_executable(),
        }
    }

    fn create_command_line(
        &mut self,
        executable: &Path,
        problem_files: &[PathBuf],
    ) -> Result<CommandDescriptor>;

    fn execute_command(&mut self, command: &CommandDescriptor) -> Result<ExecutionOutput> {
        run_command(command)
    }

    /// Negotiate the format the problem files are handed over in
    fn convert_problem(
        &mut self,
        problem_files: &[PathBuf],
        format: ProblemFormat,
        valid_formats: &[ProblemFormat],
    ) -> Result<(Vec<PathBuf>, ProblemFormat)> {
        if valid_formats.contains(&format) {
            Ok((problem_files.to_vec(), format))
        } else {
            Err(SolverError::UnsupportedFormat {
                solver: self.state().name.clone(),
                format,
            })
        }
    }

    fn default_results_format(&self, format: ProblemFormat) -> Option<ResultsFormat> {
        self.state().valid_result_formats.get(&format).copied()
    }

    fn process_logfile(&mut self) -> Result<SolverResults>;

    fn process_soln_file(&mut self, results: &mut SolverResults) -> Result<()>;

    fn get_version(&self) -> SolverVersion {
        SolverVersion::unknown()
    }
}

fn resolve_executable<T: ShellSolver + ?Sized>(solver: &mut T) -> Option<PathBuf> {
    if !solver.state().enabled {
        return None;
    }
    let executable = solver.executable();
    // default_executable may have disabled the solver
    executable.filter(|_| solver.state().enabled)
}

fn unavailable<T: ShellSolver + ?Sized>(solver: &T) -> SolverError {
    SolverError::Unavailable {
        solver: solver.state().name.clone(),
        executable: solver.executable_name().to_string(),
    }
}

impl<T: ShellSolver> Solver for T {
    fn name(&self) -> &str {
        &self.state().name
    }

    fn solver_type(&self) -> &str {
        &self.state().solver_type
    }

    fn available(&mut self, exception_flag: bool) -> Result<bool> {
        if resolve_executable(self).is_some() {
            return Ok(true);
        }
        if exception_flag {
            return Err(unavailable(self));
        }
        Ok(false)
    }

    fn problem_format(&self) -> Option<ProblemFormat> {
        self.state().problem_format
    }

    fn results_format(&self) -> Option<ResultsFormat> {
        self.state().results_format
    }

    fn set_problem_format(&mut self, format: ProblemFormat) -> Result<()> {
        self.state_mut().set_problem_format(format)
    }

    fn options(&self) -> &SolverOptions {
        &self.state().options
    }

    fn set_options(&mut self, assignments: &str) {
        self.state_mut().options.parse_assignments(assignments);
    }

    fn has_capability(&self, name: &str) -> bool {
        self.state().capabilities.has(name)
    }

    fn version(&self) -> SolverVersion {
        self.get_version()
    }

    fn create_command(&mut self, problem_files: &[PathBuf]) -> Result<CommandDescriptor> {
        let executable = resolve_executable(self).ok_or_else(|| unavailable(self))?;

        let state = self.state();
        let requested = state
            .problem_format
            .or_else(|| state.valid_problem_formats.first().copied())
            .ok_or_else(|| SolverError::InvalidInput(format!(
                "Solver ({}) has no problem formats",
                state.name
            )))?;
        let valid_formats = state.valid_problem_formats.clone();

        let (files, format) = self.convert_problem(problem_files, requested, &valid_formats)?;
        let results_format = self.default_results_format(format);
        self.state_mut().results_format = results_format;

        self.create_command_line(&executable, &files)
    }

    fn solve(&mut self, problem_files: &[PathBuf]) -> Result<SolverResults> {
        let start = Instant::now();
        let outcome = run_shell_solver(self, problem_files);
        self.state_mut().cleanup();

        let mut results = outcome?;
        results.solver.wallclock_time = Some(start.elapsed().as_secs_f64());
        Ok(results)
    }
}

fn run_shell_solver<T: ShellSolver>(solver: &mut T, problem_files: &[PathBuf]) -> Result<SolverResults> {
    let command = solver.create_command(problem_files)?;
    let output = solver.execute_command(&command)?;

    if output.return_code != 0 {
        log::error!(
            "Solver ({}) returned non-zero return code ({})\nSolver log:\n{}",
            solver.state().name,
            output.return_code,
            output.log
        );
        return Err(SolverError::ExecutionFailed {
            solver: solver.state().name.clone(),
            return_code: output.return_code,
        });
    }

    let mut results = solver.process_logfile()?;
    solver.process_soln_file(&mut results)?;

    results
        .solver
        .name
        .get_or_insert_with(|| solver.state().name.clone());
    results.solver.return_code = Some(output.return_code);
    Ok(results)
}
