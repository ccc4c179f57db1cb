pub mod mipcl;
pub mod mipcl_shell;
pub mod mock_mipcl;
pub mod os_solver;

pub use mipcl::{create_mipcl, MipclEnvironment, SolverIo};
pub use mipcl_shell::{MipclShell, MIPCL_EXECUTABLE};
pub use mock_mipcl::{MockMip, MockMipcl};
pub use os_solver::{OsShell, OS_EXECUTABLE};

use crate::domain::solver_factory::{into_plugin, SolverFactory};

/// Register every solver plugin this crate provides
pub fn register_all(factory: &mut SolverFactory) {
    mipcl::register(factory);

    factory.services().registry.register_executable(OS_EXECUTABLE);
    factory.register(
        "_ossolver",
        "Shell interface to the Optimization Services solver driver",
        |factory, kwds| into_plugin(OsShell::new(factory.services().clone(), kwds)),
    );
}
