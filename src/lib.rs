//! # MIPCL solver adapter
//!
//! Drives the MIPCL command-line solver (`mps_mipcl`) for a modeling host:
//! builds the command line from solver options, locates the executable
//! through an [`ExecutableRegistry`](services::ExecutableRegistry), runs it
//! and hands back [`SolverResults`](domain::results::SolverResults).
//!
//! ## Example
//!
//! ```no_run
//! use rust_mipcl::domain::shell::SolverKwds;
//! use rust_mipcl::domain::solver_factory::create_default_factory;
//! use rust_mipcl::services::{ExecutableRegistry, Services, TempfileManager};
//! use rust_mipcl::Solver;
//! use std::path::PathBuf;
//!
//! let services = Services::new(
//!     ExecutableRegistry::new(vec![PathBuf::from("/opt/mipcl/bin")]),
//!     TempfileManager::new(std::env::temp_dir()),
//! );
//! let factory = create_default_factory(services);
//!
//! let mut kwds = SolverKwds::default();
//! kwds.options.set("threads", Some("4".to_string()));
//! kwds.timelimit = Some(60.0);
//!
//! if let Some(mut solver) = factory.create("mipcl", kwds) {
//!     let results = solver.solve(&[PathBuf::from("model.mps")]);
//!     println!("{:?}", results);
//! }
//! ```

pub mod config;
pub mod convert;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use domain::solver::{ShellSolver, Solver};
pub use domain::solver_factory::{create_default_factory, SolverFactory};
pub use error::{Result, SolverError};
