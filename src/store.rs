use crate::model::{Classroom, FinancialRecord, InventoryItem, Role, Schedule, School, Student, User};
use chrono::NaiveTime;
use thiserror::Error;

/// Raw collections as produced by a generator, before validation.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub schools: Vec<School>,
    pub classrooms: Vec<Classroom>,
    pub schedules: Vec<Schedule>,
    pub students: Vec<Student>,
    pub inventory: Vec<InventoryItem>,
    pub finance: Vec<FinancialRecord>,
}

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("schedule {id}: unparsable time {value:?} (expected HH:MM)")]
    BadScheduleTime { id: String, value: String },
    #[error("schedule {id}: end {end} is not after start {start}")]
    ScheduleEndsBeforeStart { id: String, start: String, end: String },
    #[error("schedule {id}: unknown classroom {classroom_id}")]
    ScheduleClassroomMissing { id: String, classroom_id: String },
    #[error("classroom {id}: unknown school {school_id}")]
    ClassroomSchoolMissing { id: String, school_id: String },
    #[error("school {id}: director {director_id} is not a director")]
    SchoolDirectorInvalid { id: String, director_id: String },
    #[error("financial record {id}: amount must be a non-negative number")]
    NegativeAmount { id: String },
    #[error("duplicate user email {0}")]
    DuplicateEmail(String),
}

fn parse_hhmm(id: &str, value: &str) -> Result<NaiveTime, DatasetError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| DatasetError::BadScheduleTime {
        id: id.to_string(),
        value: value.to_string(),
    })
}

pub fn validate_schedule(s: &Schedule) -> Result<(), DatasetError> {
    let start = parse_hhmm(&s.id, &s.start_time)?;
    let end = parse_hhmm(&s.id, &s.end_time)?;
    if end <= start {
        return Err(DatasetError::ScheduleEndsBeforeStart {
            id: s.id.clone(),
            start: s.start_time.clone(),
            end: s.end_time.clone(),
        });
    }
    Ok(())
}

/// Immutable, process-wide entity store. Built once at start-up.
#[derive(Debug)]
pub struct EntityStore {
    data: Dataset,
}

impl EntityStore {
    pub fn load(data: Dataset) -> Result<Self, DatasetError> {
        let mut seen_emails = std::collections::HashSet::new();
        for u in &data.users {
            if !seen_emails.insert(u.email.as_str()) {
                return Err(DatasetError::DuplicateEmail(u.email.clone()));
            }
        }
        for school in &data.schools {
            let ok = data
                .users
                .iter()
                .any(|u| u.id == school.director_id && u.role == Role::Director);
            if !ok {
                return Err(DatasetError::SchoolDirectorInvalid {
                    id: school.id.clone(),
                    director_id: school.director_id.clone(),
                });
            }
        }
        for c in &data.classrooms {
            if !data.schools.iter().any(|s| s.id == c.school_id) {
                return Err(DatasetError::ClassroomSchoolMissing {
                    id: c.id.clone(),
                    school_id: c.school_id.clone(),
                });
            }
        }
        for s in &data.schedules {
            validate_schedule(s)?;
            if !data.classrooms.iter().any(|c| c.id == s.classroom_id) {
                return Err(DatasetError::ScheduleClassroomMissing {
                    id: s.id.clone(),
                    classroom_id: s.classroom_id.clone(),
                });
            }
        }
        for r in &data.finance {
            if !(r.amount.is_finite() && r.amount >= 0.0) {
                return Err(DatasetError::NegativeAmount { id: r.id.clone() });
            }
        }
        Ok(Self { data })
    }

    pub fn users(&self) -> &[User] {
        &self.data.users
    }

    pub fn schools(&self) -> &[School] {
        &self.data.schools
    }

    pub fn classrooms(&self) -> &[Classroom] {
        &self.data.classrooms
    }

    pub fn schedules(&self) -> &[Schedule] {
        &self.data.schedules
    }

    pub fn students(&self) -> &[Student] {
        &self.data.students
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.data.inventory
    }

    pub fn finance(&self) -> &[FinancialRecord] {
        &self.data.finance
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.data.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.data.users.iter().find(|u| u.email == email)
    }

    pub fn school(&self, id: &str) -> Option<&School> {
        self.data.schools.iter().find(|s| s.id == id)
    }

    pub fn classroom(&self, id: &str) -> Option<&Classroom> {
        self.data.classrooms.iter().find(|c| c.id == id)
    }

    /// The first classroom taught by `teacher_id`. By convention a teacher has one.
    pub fn classroom_for_teacher(&self, teacher_id: &str) -> Option<&Classroom> {
        self.data.classrooms.iter().find(|c| c.teacher_id == teacher_id)
    }

    pub fn school_name(&self, id: &str) -> String {
        self.school(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Escola não encontrada".to_string())
    }

    pub fn teacher_name(&self, id: &str) -> String {
        self.user(id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Professor não encontrado".to_string())
    }

    pub fn director_name(&self, id: &str) -> String {
        self.user(id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Diretor não encontrado".to_string())
    }

    pub fn classroom_name(&self, id: &str) -> String {
        self.classroom(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "Sala não encontrada".to_string())
    }
}
