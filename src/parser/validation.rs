use crate::error::{Result, SchedulerError};
use crate::types::ScheduleInput;
use std::collections::HashSet;

/// Warnings and (fatal) errors collected while validating a roster
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate the configuration boundary (campaign selection) before anything
/// referential is checked. These are the only validation failures that abort
/// the solve outright (SPEC_FULL.md §7, "Configuration errors").
pub fn validate_campaign_selection(input: &ScheduleInput) -> Result<()> {
    let known: HashSet<&crate::types::CampaignId> = input.campaigns.iter().map(|c| &c.id).collect();

    if !known.contains(&input.campaign_id) {
        return Err(SchedulerError::CampaignNotFound {
            campaign_id: input.campaign_id.0.clone(),
        }
        .into());
    }

    if input.target_timeslots().is_empty() {
        return Err(SchedulerError::NoTimeslotsForCampaign {
            campaign_id: input.campaign_id.0.clone(),
        }
        .into());
    }

    Ok(())
}

/// Drop referentially-broken rows from the roster, warning for each.
///
/// Implements the "skip the offending row and log a warning" policy from
/// SPEC_FULL.md §7: duplicate ids are hard errors (structural), but a
/// dangling reference (a requirement for an unknown subject, a recurring
/// class for an unknown teacher/subject/timeslot, an availability entry for
/// an unknown timeslot) is repaired by removal rather than aborting.
pub fn clean_input(mut input: ScheduleInput) -> (ScheduleInput, ValidationResult) {
    let mut result = ValidationResult::default();

    check_duplicate_ids(&input, &mut result);

    let subject_ids: HashSet<_> = input.subjects.iter().map(|s| s.id.clone()).collect();
    let timeslot_ids: HashSet<_> = input.timeslots.iter().map(|t| t.id.clone()).collect();
    let teacher_ids: HashSet<_> = input.teachers.iter().map(|t| t.id.clone()).collect();
    let student_ids: HashSet<_> = input.students.iter().map(|s| s.id.clone()).collect();

    for teacher in &mut input.teachers {
        teacher.teachable_subjects.retain(|subj| {
            let ok = subject_ids.contains(subj);
            if !ok {
                result.add_warning(format!(
                    "teacher '{}' lists unknown subject '{}', ignoring",
                    teacher.id, subj
                ));
            }
            ok
        });
        teacher.available_timeslots.retain(|ts| {
            let ok = timeslot_ids.contains(ts);
            if !ok {
                result.add_warning(format!(
                    "teacher '{}' lists unknown timeslot '{}', ignoring",
                    teacher.id, ts
                ));
            }
            ok
        });
    }

    for student in &mut input.students {
        student.requirements.retain(|subj, _| {
            let ok = subject_ids.contains(subj);
            if !ok {
                result.add_warning(format!(
                    "student '{}' requires unknown subject '{}', ignoring",
                    student.id, subj
                ));
            }
            ok
        });
        student.available_timeslots.retain(|ts| {
            let ok = timeslot_ids.contains(ts);
            if !ok {
                result.add_warning(format!(
                    "student '{}' lists unknown timeslot '{}', ignoring",
                    student.id, ts
                ));
            }
            ok
        });
    }

    input.regular_classes.retain(|rc| {
        let ok = teacher_ids.contains(&rc.teacher_id)
            && subject_ids.contains(&rc.subject_id)
            && timeslot_ids.contains(&rc.timeslot_id);
        if !ok {
            result.add_warning(format!(
                "regular class '{}' references an unknown teacher/subject/timeslot, dropping",
                rc.id
            ));
        }
        ok
    });

    for rc in &mut input.regular_classes {
        rc.enrolled_student_ids.retain(|sid| {
            let ok = student_ids.contains(sid);
            if !ok {
                result.add_warning(format!(
                    "regular class '{}' enrolls unknown student '{}', ignoring",
                    rc.id, sid
                ));
            }
            ok
        });
    }

    for teacher in &input.teachers {
        if teacher.teachable_subjects.is_empty() {
            result.add_warning(format!(
                "teacher '{}' is not qualified for any subject",
                teacher.id
            ));
        }
    }

    (input, result)
}

fn check_duplicate_ids(input: &ScheduleInput, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for s in &input.subjects {
        if !seen.insert(&s.id) {
            result.add_error(format!("duplicate subject ID: '{}'", s.id));
        }
    }
    let mut seen = HashSet::new();
    for t in &input.teachers {
        if !seen.insert(&t.id) {
            result.add_error(format!("duplicate teacher ID: '{}'", t.id));
        }
    }
    let mut seen = HashSet::new();
    for s in &input.students {
        if !seen.insert(&s.id) {
            result.add_error(format!("duplicate student ID: '{}'", s.id));
        }
    }
    let mut seen = HashSet::new();
    for ts in &input.timeslots {
        if !seen.insert(&ts.id) {
            result.add_error(format!("duplicate timeslot ID: '{}'", ts.id));
        }
    }
}
