use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SolverStatus {
    Ok,
    Warning,
    Error,
    Aborted,
    #[default]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TerminationCondition {
    Optimal,
    Feasible,
    Infeasible,
    Unbounded,
    MaxTimeLimit,
    Error,
    #[default]
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SolverInfo {
    pub name: Option<String>,
    pub status: SolverStatus,
    pub termination_condition: TerminationCondition,
    pub return_code: Option<i32>,
    pub message: Option<String>,
    /// Wall clock seconds spent in the solver process
    pub wallclock_time: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProblemInfo {
    pub name: Option<String>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Solution {
    pub objective: Option<f64>,
    pub variables: HashMap<String, f64>,
}

/// What a solver run produced. The default value means "no result".
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SolverResults {
    pub solver: SolverInfo,
    pub problem: ProblemInfo,
    pub solutions: Vec<Solution>,
}

impl SolverResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_solution(&self) -> bool {
        !self.solutions.is_empty()
    }
}
