use std::collections::BTreeMap;

use crate::domain::shell::SolverKwds;
use crate::domain::solver::Solver;
use crate::domain::solvers;
use crate::error::Result;
use crate::services::Services;

type SolverConstructor =
    Box<dyn Fn(&SolverFactory, SolverKwds) -> Option<Box<dyn Solver>> + Send + Sync>;

struct SolverPlugin {
    doc: String,
    constructor: SolverConstructor,
}

/// Alias -> constructor table for solver plugins
pub struct SolverFactory {
    services: Services,
    plugins: BTreeMap<String, SolverPlugin>,
}

impl SolverFactory {
    pub fn new(services: Services) -> Self {
        SolverFactory {
            services,
            plugins: BTreeMap::new(),
        }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// Register a plugin under `alias`, replacing any previous one
    pub fn register<F>(&mut self, alias: &str, doc: &str, constructor: F)
    where
        F: Fn(&SolverFactory, SolverKwds) -> Option<Box<dyn Solver>> + Send + Sync + 'static,
    {
        self.plugins.insert(
            alias.to_string(),
            SolverPlugin {
                doc: doc.to_string(),
                constructor: Box::new(constructor),
            },
        );
    }

    /// Create a solver instance for `alias`
    pub fn create(&self, alias: &str, kwds: SolverKwds) -> Option<Box<dyn Solver>> {
        match self.plugins.get(alias) {
            Some(plugin) => (plugin.constructor)(self, kwds),
            None => {
                log::error!("Unknown solver: {}", alias);
                None
            }
        }
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.plugins.contains_key(alias)
    }

    /// Registered aliases with their descriptions, in alias order
    pub fn plugins(&self) -> impl Iterator<Item = (&str, &str)> {
        self.plugins
            .iter()
            .map(|(alias, plugin)| (alias.as_str(), plugin.doc.as_str()))
    }
}

/// Box a freshly constructed solver, logging construction failures
pub fn into_plugin<S: Solver + 'static>(solver: Result<S>) -> Option<Box<dyn Solver>> {
    match solver {
        Ok(solver) => Some(Box::new(solver)),
        Err(e) => {
            log::error!("{}", e);
            None
        }
    }
}

/// Create a factory with every plugin of this crate registered
pub fn create_default_factory(services: Services) -> SolverFactory {
    let mut factory = SolverFactory::new(services);
    solvers::register_all(&mut factory);
    factory
}
