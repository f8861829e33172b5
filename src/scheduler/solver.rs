use crate::error::Result;
use crate::scheduler::model_builder::BuiltModel;
use crate::types::{DecisionKey, StudentId, SubjectId};
use good_lp::{Solution, SolverModel};
use std::collections::BTreeMap;

/// The raw valuation of a solved model, or an empty, well-formed result if
/// the backend could not find a feasible solution.
#[derive(Debug, Default)]
pub struct SolveOutcome {
    pub assigned: BTreeMap<DecisionKey, bool>,
    pub shortage: BTreeMap<(StudentId, SubjectId), u32>,
    pub feasible: bool,
}

/// Invoke the HiGHS MILP backend and extract variable valuations.
///
/// Per SPEC_FULL.md §4.4/§7, infeasibility and solver failure never surface
/// as a hard `Err`: the caller always gets a well-formed [`SolveOutcome`],
/// empty when no solution exists.
pub fn solve(model: BuiltModel) -> Result<SolveOutcome> {
    let BuiltModel {
        vars,
        objective,
        constraints,
        x,
        shortage,
    } = model;

    let mut problem = vars.maximise(objective).using(good_lp::solvers::highs::highs);
    for constraint in constraints {
        problem = problem.with(constraint);
    }

    let solution = match problem.solve() {
        Ok(solution) => solution,
        Err(err) => {
            log::warn!("solver did not reach a feasible solution: {err:?}");
            return Ok(SolveOutcome::default());
        }
    };

    let assigned = x
        .into_iter()
        .map(|(key, var)| (key, solution.value(var) > 0.5))
        .collect();

    let shortage = shortage
        .into_iter()
        .map(|(key, var)| (key, solution.value(var).round().max(0.0) as u32))
        .collect();

    Ok(SolveOutcome {
        assigned,
        shortage,
        feasible: true,
    })
}
