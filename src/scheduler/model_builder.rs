use crate::scheduler::eligibility::Eligibility;
use crate::types::{
    DecisionKey, GapPreference, ScheduleInput, StudentId, SubjectId, TeacherId, TimeSlot, TimeSlotId,
};
use chrono::NaiveDate;
use good_lp::{constraint, variable, variables, Constraint, Expression, ProblemVariables, Variable};
use std::collections::BTreeMap;

/// Everything the solver driver needs to invoke `good_lp`, plus the variable
/// maps the result projector needs to read a solution back out.
///
/// Built once per solve and consumed by [`crate::scheduler::solver::solve`];
/// there is no module-level mutable state (SPEC_FULL.md §9 "Module/global
/// state").
pub struct BuiltModel {
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<Constraint>,
    pub x: BTreeMap<DecisionKey, Variable>,
    pub shortage: BTreeMap<(StudentId, SubjectId), Variable>,
}

/// Reify `count ∈ {0,1,2}` via one-hot indicators; returns `(is_one, is_two)`.
/// Posts `z0+z1+z2=1` and `count = z1 + 2·z2` (SPEC_FULL.md §4.3). Exact by
/// construction: no big-M, because the domain is exactly three values.
fn reify_one_hot_count(
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    count: Expression,
) -> (Variable, Variable) {
    let z0 = vars.add(variable().binary());
    let z1 = vars.add(variable().binary());
    let z2 = vars.add(variable().binary());
    constraints.push(constraint!(z0 + z1 + z2 == 1));
    constraints.push(constraint!(count - z1 - 2.0 * z2 == 0));
    (z1, z2)
}

/// Reify `pair ⇔ a ∧ b` for binary `a, b` (standard AND-linearization).
fn reify_and(vars: &mut ProblemVariables, constraints: &mut Vec<Constraint>, a: Variable, b: Variable) -> Variable {
    let pair = vars.add(variable().binary());
    constraints.push(constraint!(pair <= a));
    constraints.push(constraint!(pair <= b));
    constraints.push(constraint!(pair >= a + b - 1.0));
    pair
}

/// Reify `gap ⇔ a ⊕ b` for binary `a, b` (standard exact XOR-linearization).
fn reify_xor(vars: &mut ProblemVariables, constraints: &mut Vec<Constraint>, a: Variable, b: Variable) -> Variable {
    let gap = vars.add(variable().binary());
    constraints.push(constraint!(gap >= a - b));
    constraints.push(constraint!(gap >= b - a));
    constraints.push(constraint!(gap <= a + b));
    constraints.push(constraint!(gap <= 2.0 - a - b));
    gap
}

/// Reify `present ⇔ total ≥ 1` against a binary `present`, for `total` bounded
/// above by `upper`.
fn reify_threshold(constraints: &mut Vec<Constraint>, present: Variable, total: Expression, upper: f64) {
    constraints.push(constraint!(total.clone() <= upper * present));
    constraints.push(constraint!(total >= present));
}

/// Build the complete MILP model: decision variables, H1-H4 hard
/// constraints, and the S1-S7 weighted objective (SPEC_FULL.md §4.2, §4.3).
pub fn build_model(input: &ScheduleInput, eligibility: &Eligibility) -> BuiltModel {
    let mut vars = variables!();
    let mut constraints = Vec::new();
    let mut objective = Expression::default();

    let x: BTreeMap<DecisionKey, Variable> = eligibility
        .keys
        .iter()
        .map(|key| (key.clone(), vars.add(variable().binary())))
        .collect();

    let by_student_subject = group_vars(&x, |k| (k.student_id.clone(), k.subject_id.clone()));
    let by_student_ts = group_vars(&x, |k| (k.student_id.clone(), k.timeslot_id.clone()));
    let by_teacher_ts = group_vars(&x, |k| (k.teacher_id.clone(), k.timeslot_id.clone()));
    let by_teacher_ts_subject = group_keyed(&x, |k| (k.teacher_id.clone(), k.timeslot_id.clone(), k.subject_id.clone()));
    let by_teacher = group_vars(&x, |k| k.teacher_id.clone());

    // H1 - student-subject demand with shortage slack.
    let mut shortage: BTreeMap<(StudentId, SubjectId), Variable> = BTreeMap::new();
    for student in &input.students {
        for (subject_id, &required) in &student.requirements {
            if required == 0 {
                continue;
            }
            let key = (student.id.clone(), subject_id.clone());
            let slack = vars.add(variable().integer().min(0.0).max(required as f64));
            let demand: Expression = by_student_subject
                .get(&key)
                .map(|vs| vs.iter().map(|&v| Expression::from(v)).sum())
                .unwrap_or_default();
            constraints.push(constraint!(demand + slack == required as f64));
            shortage.insert(key, slack);
        }
    }

    // H2 - student non-overlap: at most one lesson per student per timeslot.
    for group in by_student_ts.values() {
        if group.len() > 1 {
            let sum: Expression = group.iter().map(|&v| Expression::from(v)).sum();
            constraints.push(constraint!(sum <= 1.0));
        }
    }

    // H3 - teacher capacity: at most two students per teacher per timeslot.
    for group in by_teacher_ts.values() {
        if group.len() > 2 {
            let sum: Expression = group.iter().map(|&v| Expression::from(v)).sum();
            constraints.push(constraint!(sum <= 2.0));
        }
    }

    // H4 - teacher presence and conditional minimum load.
    for (teacher_id, group) in &by_teacher {
        let Some(teacher) = input.teachers.iter().find(|t| &t.id == teacher_id) else {
            continue;
        };
        let present = vars.add(variable().binary());
        let total: Expression = group.iter().map(|&v| Expression::from(v)).sum();
        reify_threshold(&mut constraints, present, total.clone(), group.len() as f64);
        if teacher.min_classes > 0 {
            constraints.push(constraint!(total >= teacher.min_classes as f64 * present));
        }
    }

    let w = &input.weights;

    // S1/S2 - pair bonus and singleton penalty via one-hot count decomposition.
    if w.max_two_students_bonus != 0.0 || w.single_student_penalty != 0.0 {
        for group in by_teacher_ts.values() {
            let count: Expression = group.iter().map(|&v| Expression::from(v)).sum();
            let (is_one, is_two) = reify_one_hot_count(&mut vars, &mut constraints, count);
            if w.max_two_students_bonus != 0.0 {
                objective += w.max_two_students_bonus * is_two;
            }
            if w.single_student_penalty != 0.0 {
                objective -= w.single_student_penalty * is_one;
            }
        }
    }

    // S3 - same-grade same-subject pair bonus.
    if w.same_grade_bonus != 0.0 {
        for group in by_teacher_ts_subject.values() {
            for i in 0..group.len() {
                for j in (i + 1)..group.len() {
                    let (key_a, var_a) = &group[i];
                    let (key_b, var_b) = &group[j];
                    let grade_a = input.students.iter().find(|s| s.id == key_a.student_id).map(|s| &s.grade);
                    let grade_b = input.students.iter().find(|s| s.id == key_b.student_id).map(|s| &s.grade);
                    if grade_a.is_some() && grade_a == grade_b {
                        let pair = reify_and(&mut vars, &mut constraints, *var_a, *var_b);
                        objective += w.same_grade_bonus * pair;
                    }
                }
            }
        }
    }

    // S4 - recurring-class continuity.
    if w.regular_class_continuity_bonus != 0.0 {
        let continuity: std::collections::HashSet<(TeacherId, SubjectId, StudentId)> = input
            .regular_classes
            .iter()
            .flat_map(|rc| {
                rc.enrolled_student_ids
                    .iter()
                    .map(move |sid| (rc.teacher_id.clone(), rc.subject_id.clone(), sid.clone()))
            })
            .collect();
        for (key, &var) in &x {
            if continuity.contains(&(key.teacher_id.clone(), key.subject_id.clone(), key.student_id.clone())) {
                objective += w.regular_class_continuity_bonus * var;
            }
        }
    }

    let timeslots_by_id: BTreeMap<TimeSlotId, &TimeSlot> = input
        .target_timeslots()
        .into_iter()
        .map(|ts| (ts.id.clone(), ts))
        .collect();

    // S5 - teacher day-gap penalty.
    if w.teacher_gap_penalty != 0.0 {
        let assigned = reify_assignment(&mut vars, &mut constraints, &by_teacher_ts);
        for teacher in &input.teachers {
            add_gap_penalty(
                &mut vars,
                &mut constraints,
                &mut objective,
                &teacher.available_timeslots,
                &timeslots_by_id,
                |ts_id| assigned.get(&(teacher.id.clone(), ts_id.clone())).copied(),
                w.teacher_gap_penalty,
            );
        }
    }

    // S6 - student day-gap penalty, doubled under NoGapPreferred.
    if w.student_gap_penalty != 0.0 {
        let assigned = reify_assignment(&mut vars, &mut constraints, &by_student_ts);
        for student in &input.students {
            let weight = match student.gap_preference {
                GapPreference::NoGapPreferred => w.student_gap_penalty * 2.0,
                GapPreference::GapAllowed => w.student_gap_penalty,
            };
            add_gap_penalty(
                &mut vars,
                &mut constraints,
                &mut objective,
                &student.available_timeslots,
                &timeslots_by_id,
                |ts_id| assigned.get(&(student.id.clone(), ts_id.clone())).copied(),
                weight,
            );
        }
    }

    // S7 - shortage penalty.
    if w.shortage_penalty != 0.0 {
        for &slack in shortage.values() {
            objective -= w.shortage_penalty * slack;
        }
    }

    log::info!(
        "model: {} decision vars, {} shortage vars, {} constraints",
        x.len(),
        shortage.len(),
        constraints.len()
    );

    BuiltModel {
        vars,
        objective,
        constraints,
        x,
        shortage,
    }
}

/// Reify "someone is assigned" at every `(entity, timeslot)` key that has at
/// least one decision variable, for use by the day-gap penalty terms.
fn reify_assignment<K: Clone + Ord>(
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    by_key_ts: &BTreeMap<(K, TimeSlotId), Vec<Variable>>,
) -> BTreeMap<(K, TimeSlotId), Variable> {
    let mut assigned = BTreeMap::new();
    for (key, group) in by_key_ts {
        let present = vars.add(variable().binary());
        let total: Expression = group.iter().map(|&v| Expression::from(v)).sum();
        reify_threshold(constraints, present, total, group.len() as f64);
        assigned.insert(key.clone(), present);
    }
    assigned
}

/// For one entity's available timeslots, walk each date's timeslots in
/// `period_index` order and penalize every working/not-working transition
/// between consecutive available periods (SPEC_FULL.md §4.3 S5/S6).
fn add_gap_penalty(
    vars: &mut ProblemVariables,
    constraints: &mut Vec<Constraint>,
    objective: &mut Expression,
    available: &[TimeSlotId],
    timeslots_by_id: &BTreeMap<TimeSlotId, &TimeSlot>,
    assigned_at: impl Fn(&TimeSlotId) -> Option<Variable>,
    weight: f64,
) {
    let mut by_date: BTreeMap<NaiveDate, Vec<&TimeSlot>> = BTreeMap::new();
    for ts_id in available {
        if let Some(&ts) = timeslots_by_id.get(ts_id) {
            by_date.entry(ts.date).or_default().push(ts);
        }
    }

    for slots in by_date.values_mut() {
        slots.sort_by_key(|ts| ts.period_index);
        for pair in slots.windows(2) {
            let (a, b) = (assigned_at(&pair[0].id), assigned_at(&pair[1].id));
            match (a, b) {
                (Some(a), Some(b)) => {
                    let gap = reify_xor(vars, constraints, a, b);
                    *objective -= weight * gap;
                }
                (Some(v), None) | (None, Some(v)) => {
                    *objective -= weight * v;
                }
                (None, None) => {}
            }
        }
    }
}

/// Group `x` by a projected key, keeping only the variables.
fn group_vars<K: Ord, F: Fn(&DecisionKey) -> K>(
    x: &BTreeMap<DecisionKey, Variable>,
    project: F,
) -> BTreeMap<K, Vec<Variable>> {
    let mut map: BTreeMap<K, Vec<Variable>> = BTreeMap::new();
    for (key, &var) in x {
        map.entry(project(key)).or_default().push(var);
    }
    map
}

/// Group `x` by a projected key, keeping `(DecisionKey, Variable)` pairs for
/// callers that also need the key (e.g. S3's grade lookup).
fn group_keyed<K: Ord, F: Fn(&DecisionKey) -> K>(
    x: &BTreeMap<DecisionKey, Variable>,
    project: F,
) -> BTreeMap<K, Vec<(DecisionKey, Variable)>> {
    let mut map: BTreeMap<K, Vec<(DecisionKey, Variable)>> = BTreeMap::new();
    for (key, &var) in x {
        map.entry(project(key)).or_default().push((key.clone(), var));
    }
    map
}
