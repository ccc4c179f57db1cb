pub mod formats;
pub mod options;
pub mod results;
pub mod shell;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod validate;
pub mod version;
