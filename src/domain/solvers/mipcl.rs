use crate::domain::formats::ProblemFormat;
use crate::domain::shell::SolverKwds;
use crate::domain::solver::Solver;
use crate::domain::solver_factory::{into_plugin, SolverFactory};
use crate::domain::solvers::mipcl_shell::{MipclShell, MIPCL_EXECUTABLE};
use crate::domain::solvers::mock_mipcl::MockMipcl;
use crate::domain::version::{extract_version, SolverVersion};
use crate::error::SolverError;
use crate::services::ExecutableRegistry;

/// How problems are handed to MIPCL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverIo {
    Mps,
    Mod,
    /// Through OSSolverService
    Os,
}

impl SolverIo {
    /// Parse the `solver_io` keyword; a missing mode means `mps`
    pub fn from_mode(mode: Option<&str>) -> Option<Self> {
        match mode {
            None | Some("mps") => Some(SolverIo::Mps),
            Some("mod") => Some(SolverIo::Mod),
            Some("os") => Some(SolverIo::Os),
            Some(_) => None,
        }
    }
}

/// MIPCL settings resolved once at startup and shared by every adapter
#[derive(Debug, Clone, Copy)]
pub struct MipclEnvironment {
    version: SolverVersion,
}

impl MipclEnvironment {
    pub fn configure(registry: &ExecutableRegistry) -> Self {
        let version = extract_version("");
        if registry.registered_executable(MIPCL_EXECUTABLE).is_none() {
            log::debug!("'{}' not found; MIPCL version left unknown", MIPCL_EXECUTABLE);
        }
        MipclEnvironment { version }
    }

    pub fn version(&self) -> SolverVersion {
        self.version
    }
}

/// Route a `mipcl` request to the delegate for its I/O mode.
///
/// Returns `None` (and logs) for an unknown mode.
pub fn create_mipcl(factory: &SolverFactory, mut kwds: SolverKwds) -> Option<Box<dyn Solver>> {
    let mode = kwds.solver_io.take();
    let Some(io) = SolverIo::from_mode(mode.as_deref()) else {
        log::error!("{}", SolverError::UnknownIo(mode.unwrap_or_default()));
        return None;
    };

    match io {
        SolverIo::Mps | SolverIo::Mod => {
            let format = if io == SolverIo::Mps {
                ProblemFormat::Mps
            } else {
                ProblemFormat::Mod
            };
            let mut opt = factory.create("_mipcl_shell", kwds)?;
            if let Err(e) = opt.set_problem_format(format) {
                log::error!("{}", e);
                return None;
            }
            Some(opt)
        }
        SolverIo::Os => {
            let mut opt = factory.create("_ossolver", kwds)?;
            opt.set_options(&format!("solver={}", MIPCL_EXECUTABLE));
            Some(opt)
        }
    }
}

/// Register the MIPCL plugins and executable with the factory
pub fn register(factory: &mut SolverFactory) {
    let registry = factory.services().registry.clone();
    registry.register_executable(MIPCL_EXECUTABLE);
    let environment = MipclEnvironment::configure(&registry);

    factory.register("mipcl", "The MIPCL LP/MIP solver", create_mipcl);
    factory.register(
        "_mipcl_shell",
        "Shell interface to the MIPCL LP/MIP solver",
        move |factory, kwds| {
            into_plugin(MipclShell::new(
                factory.services().clone(),
                Some(environment.version()),
                kwds,
            ))
        },
    );
    factory.register(
        "_mock_mipcl",
        "A Mock MIPCL solver used for testing",
        move |factory, kwds| {
            into_plugin(MockMipcl::new(
                factory.services().clone(),
                Some(environment.version()),
                kwds,
            ))
        },
    );
}
