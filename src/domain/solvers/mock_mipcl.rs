use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::formats::{ProblemFormat, ResultsFormat};
use crate::domain::results::SolverResults;
use crate::domain::shell::{CommandDescriptor, ExecutionOutput, ShellState, SolverKwds};
use crate::domain::solver::ShellSolver;
use crate::domain::solvers::mipcl_shell::MipclShell;
use crate::domain::version::SolverVersion;
use crate::error::{Result, SolverError};
use crate::services::Services;

const MOCK_EXECUTABLE: &str = "mock";

/// Replays canned solver output instead of launching a process.
///
/// For a problem file `<dir>/<stem>.<ext>` the log is read from
/// `<dir>/<subdir>/<stem>.out`, and a solution file, when the adapter asks
/// for one, is copied from `<dir>/<subdir>/<stem>.sol` or `.soln`.
#[derive(Debug, Clone)]
pub struct MockMip {
    subdir: String,
    problem: Option<String>,
    dir: Option<PathBuf>,
}

impl MockMip {
    pub fn new(subdir: &str) -> Self {
        MockMip {
            subdir: subdir.to_string(),
            problem: None,
            dir: None,
        }
    }

    pub fn executable(&self) -> PathBuf {
        PathBuf::from(MOCK_EXECUTABLE)
    }

    /// Remember which fixture belongs to the problem being solved
    pub fn create_command_line(&mut self, problem_files: &[PathBuf]) {
        let Some(first) = problem_files.first() else {
            return;
        };
        self.problem = first
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('.').next().map(str::to_string));
        self.dir = Some(
            first
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default(),
        );
    }

    pub fn execute_command(&self, soln_file: Option<&Path>) -> Result<ExecutionOutput> {
        let (Some(dir), Some(problem)) = (&self.dir, &self.problem) else {
            return Err(SolverError::InvalidInput(
                "mock solver was run without a problem file".to_string(),
            ));
        };
        let base = dir.join(&self.subdir).join(problem);

        // First fixture found wins, whatever the target is called
        if let Some(soln_file) = soln_file {
            for ext in ["sol", "soln"] {
                let fixture = with_extension(&base, ext);
                if fixture.is_file() {
                    fs::copy(&fixture, soln_file)?;
                    break;
                }
            }
        }

        let out = with_extension(&base, "out");
        if !out.is_file() {
            return Err(SolverError::MissingMockData(out));
        }
        let log = fs::read_to_string(&out)?;

        Ok(ExecutionOutput { return_code: 0, log })
    }

    /// MPS and model files pass through; anything else is treated as MPS
    pub fn convert_problem(
        &self,
        problem_files: &[PathBuf],
        format: ProblemFormat,
    ) -> (Vec<PathBuf>, ProblemFormat) {
        match format {
            ProblemFormat::Mps | ProblemFormat::Mod => (problem_files.to_vec(), format),
            _ => (problem_files.to_vec(), ProblemFormat::Mps),
        }
    }
}

// Appends rather than replaces, so `a.b` becomes `a.b.out`.
fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut path: OsString = base.as_os_str().to_owned();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}

/// A Mock MIPCL solver used for testing
pub struct MockMipcl {
    shell: MipclShell,
    mock: MockMip,
}

impl MockMipcl {
    /// Builds even when the requested executable does not exist
    pub fn new(services: Services, version: Option<SolverVersion>, kwds: SolverKwds) -> Result<Self> {
        let shell = match MipclShell::new(services.clone(), version, kwds.clone()) {
            Ok(shell) => shell,
            Err(SolverError::Application(message)) => {
                log::debug!("Ignoring MIPCL setup failure for mock solver: {}", message);
                MipclShell::new(
                    services,
                    version,
                    SolverKwds {
                        executable: None,
                        ..kwds
                    },
                )?
            }
            Err(e) => return Err(e),
        };

        Ok(MockMipcl {
            shell,
            mock: MockMip::new("mipcl"),
        })
    }
}

impl ShellSolver for MockMipcl {
    fn state(&self) -> &ShellState {
        self.shell.state()
    }

    fn state_mut(&mut self) -> &mut ShellState {
        self.shell.state_mut()
    }

    fn executable_name(&self) -> &str {
        self.shell.executable_name()
    }

    fn default_executable(&mut self) -> Option<PathBuf> {
        self.shell.default_executable()
    }

    fn executable(&mut self) -> Option<PathBuf> {
        Some(self.mock.executable())
    }

    fn create_command_line(
        &mut self,
        executable: &Path,
        problem_files: &[PathBuf],
    ) -> Result<CommandDescriptor> {
        let command = self.shell.create_command_line(executable, problem_files)?;
        self.mock.create_command_line(problem_files);
        Ok(command)
    }

    fn execute_command(&mut self, _command: &CommandDescriptor) -> Result<ExecutionOutput> {
        let soln_file = self.shell.state().soln_file.clone();
        self.mock.execute_command(soln_file.as_deref())
    }

    fn convert_problem(
        &mut self,
        problem_files: &[PathBuf],
        format: ProblemFormat,
        _valid_formats: &[ProblemFormat],
    ) -> Result<(Vec<PathBuf>, ProblemFormat)> {
        Ok(self.mock.convert_problem(problem_files, format))
    }

    fn default_results_format(&self, format: ProblemFormat) -> Option<ResultsFormat> {
        self.shell.default_results_format(format)
    }

    fn process_logfile(&mut self) -> Result<SolverResults> {
        self.shell.process_logfile()
    }

    fn process_soln_file(&mut self, results: &mut SolverResults) -> Result<()> {
        self.shell.process_soln_file(results)
    }

    fn get_version(&self) -> SolverVersion {
        self.shell.get_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::Solver;
    use crate::services::{ExecutableRegistry, TempfileManager};

    fn services(dir: &Path) -> Services {
        Services::new(
            ExecutableRegistry::new(vec![dir.to_path_buf()]),
            TempfileManager::new(dir),
        )
    }

    fn write_fixture(dir: &Path, name: &str, contents: &str) {
        let mock_dir = dir.join("mipcl");
        fs::create_dir_all(&mock_dir).unwrap();
        fs::write(mock_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_constructs_without_real_executable() {
        let dir = tempfile::tempdir().unwrap();
        let kwds = SolverKwds {
            executable: Some(dir.path().join("missing-mipcl")),
            ..SolverKwds::default()
        };
        let mut mock = MockMipcl::new(services(dir.path()), None, kwds).unwrap();
        assert_eq!(mock.problem_format(), Some(ProblemFormat::Mps));
        assert!(mock.available(true).unwrap());
        assert_eq!(mock.executable(), Some(PathBuf::from("mock")));
    }

    #[test]
    fn test_convert_problem_falls_back_to_mps() {
        let mock = MockMip::new("mipcl");
        let files = vec![PathBuf::from("/tmp/p.nl")];
        assert_eq!(mock.convert_problem(&files, ProblemFormat::Nl).1, ProblemFormat::Mps);
        assert_eq!(mock.convert_problem(&files, ProblemFormat::Osil).1, ProblemFormat::Mps);
        assert_eq!(mock.convert_problem(&files, ProblemFormat::Mod).1, ProblemFormat::Mod);
        assert_eq!(mock.convert_problem(&files, ProblemFormat::Mps).0, files);
    }

    #[test]
    fn test_execute_replays_out_fixture() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "knapsack.out", "MIPCL mock log\n");

        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("knapsack.cpxlp.mps")]);
        let output = mock.execute_command(None).unwrap();

        assert_eq!(output.return_code, 0);
        assert_eq!(output.log, "MIPCL mock log\n");
    }

    #[test]
    fn test_execute_copies_solution_fixture() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "knapsack.out", "");
        write_fixture(dir.path(), "knapsack.soln", "x 1\n");
        let soln_file = dir.path().join("result.soln");

        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("knapsack.mps")]);
        mock.execute_command(Some(&soln_file)).unwrap();

        assert_eq!(fs::read_to_string(&soln_file).unwrap(), "x 1\n");
    }

    #[test]
    fn test_execute_copies_soln_fixture_to_sol_target() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "k.out", "");
        write_fixture(dir.path(), "k.soln", "x 2\n");
        let soln_file = dir.path().join("result.sol");

        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("k.mps")]);
        mock.execute_command(Some(&soln_file)).unwrap();

        assert_eq!(fs::read_to_string(&soln_file).unwrap(), "x 2\n");
    }

    #[test]
    fn test_execute_prefers_sol_fixture_for_any_target_name() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "k.out", "");
        write_fixture(dir.path(), "k.sol", "x 3\n");
        write_fixture(dir.path(), "k.soln", "x 4\n");
        let soln_file = dir.path().join("result.txt");

        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("k.mps")]);
        mock.execute_command(Some(&soln_file)).unwrap();

        assert_eq!(fs::read_to_string(&soln_file).unwrap(), "x 3\n");
    }

    #[test]
    fn test_execute_without_solution_fixture_copies_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "k.out", "log\n");
        let soln_file = dir.path().join("result.sol");

        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("k.mps")]);
        let output = mock.execute_command(Some(&soln_file)).unwrap();

        assert_eq!(output.log, "log\n");
        assert!(!soln_file.exists());
    }

    #[test]
    fn test_execute_without_fixture_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockMip::new("mipcl");
        mock.create_command_line(&[dir.path().join("absent.mps")]);

        assert!(matches!(
            mock.execute_command(None),
            Err(SolverError::MissingMockData(_))
        ));
    }

    #[test]
    fn test_solve_through_mock() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "model.out", "Optimal solution found\n");

        let kwds = SolverKwds {
            timelimit: Some(10.0),
            ..SolverKwds::default()
        };
        let mut mock = MockMipcl::new(services(dir.path()), None, kwds).unwrap();
        let problem = vec![dir.path().join("model.mps")];

        let command = mock.create_command(&problem).unwrap();
        assert_eq!(command.cmd, vec!["mock", "-time", "10"]);

        let results = mock.solve(&problem).unwrap();
        assert_eq!(results.solver.return_code, Some(0));
        assert!(!results.has_solution());
    }
}
