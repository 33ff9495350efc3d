use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-supplied input for creating a student. Unvalidated until
/// [`StudentRegistry::create`] runs it through the field rules.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentDraft {
    pub first_name: String,
    pub last_name: String,
    pub course: i64,
    pub card: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub course: i64,
    pub card: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Student not found")]
    NotFound,

    #[error("Student already exists")]
    AlreadyExists,

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Error")]
    Internal,
}

pub fn validate_course(course: i64) -> Result<(), FieldError> {
    if (1..=6).contains(&course) {
        Ok(())
    } else {
        Err(FieldError {
            field: "course",
            message: "Course should be in [1, 6]".to_string(),
        })
    }
}

/// The card rule counts characters of the decimal rendering, sign included,
/// not a numeric range. `-12345` renders as six characters and passes.
pub fn validate_card(card: i64) -> Result<(), FieldError> {
    if card.to_string().len() == 6 {
        Ok(())
    } else {
        Err(FieldError {
            field: "card",
            message: "Card number length have to be equal to 6".to_string(),
        })
    }
}

/// Runs every field rule and collects all failures, so a doubly-bad draft
/// reports both fields at once.
pub fn validate_draft(draft: &StudentDraft) -> Result<(), RegistryError> {
    let mut fields = Vec::new();
    if let Err(e) = validate_course(draft.course) {
        fields.push(e);
    }
    if let Err(e) = validate_card(draft.card) {
        fields.push(e);
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(RegistryError::Validation(fields))
    }
}

struct RegistryInner {
    students: BTreeMap<u64, Student>,
    next_id: u64,
}

/// In-memory student records keyed by a registry-assigned id. The id counter
/// sits under the same lock as the map, so check-then-insert is one critical
/// section and ids stay unique under concurrent creates.
pub struct StudentRegistry {
    inner: RwLock<RegistryInner>,
}

impl StudentRegistry {
    pub fn new() -> StudentRegistry {
        StudentRegistry {
            inner: RwLock::new(RegistryInner {
                students: BTreeMap::new(),
                next_id: 0,
            }),
        }
    }

    /// Validates the draft, rejects a card already held by a stored student,
    /// then assigns the next id and commits the record. Ids start at 1 and
    /// are never reused, not even after a delete.
    pub fn create(&self, draft: StudentDraft) -> Result<Student, RegistryError> {
        validate_draft(&draft)?;

        let mut inner = self.inner.write().unwrap();
        if inner.students.values().any(|s| s.card == draft.card) {
            return Err(RegistryError::AlreadyExists);
        }
        inner.next_id += 1;
        let student = Student {
            id: inner.next_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            course: draft.course,
            card: draft.card,
        };
        inner.students.insert(student.id, student.clone());
        Ok(student)
    }

    pub fn get(&self, id: u64) -> Result<Student, RegistryError> {
        let inner = self.inner.read().unwrap();
        inner
            .students
            .get(&id)
            .cloned()
            .ok_or(RegistryError::NotFound)
    }

    /// All students, or only those on the given course. Iteration is in
    /// ascending id order, which equals insertion order since ids only grow.
    pub fn list(&self, course: Option<i64>) -> Vec<Student> {
        let inner = self.inner.read().unwrap();
        inner
            .students
            .values()
            .filter(|s| course.map_or(true, |c| s.course == c))
            .cloned()
            .collect()
    }

    /// Removes the record. The freed card becomes reusable by later creates;
    /// the id does not.
    pub fn delete(&self, id: u64) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().unwrap();
        inner
            .students
            .remove(&id)
            .map(|_| ())
            .ok_or(RegistryError::NotFound)
    }
}

impl Default for StudentRegistry {
    fn default() -> StudentRegistry {
        StudentRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first_name: &str, course: i64, card: i64) -> StudentDraft {
        StudentDraft {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            course,
            card,
        }
    }

    #[test]
    fn course_bounds_are_inclusive() {
        assert!(validate_course(1).is_ok());
        assert!(validate_course(6).is_ok());
        assert!(validate_course(0).is_err());
        assert!(validate_course(7).is_err());
    }

    #[test]
    fn card_must_render_as_six_characters() {
        assert!(validate_card(123456).is_ok());
        assert!(validate_card(12345).is_err());
        assert!(validate_card(1234567).is_err());
        // Sign counts as a character, same as the length-of-string rule.
        assert!(validate_card(-12345).is_ok());
        assert!(validate_card(-123456).is_err());
    }

    #[test]
    fn validation_reports_every_failing_field() {
        let err = validate_draft(&draft("Jo", 0, 12345)).unwrap_err();
        match err {
            RegistryError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
                assert_eq!(names, vec!["course", "card"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let registry = StudentRegistry::new();
        let a = registry.create(draft("Jo", 1, 100000)).unwrap();
        let b = registry.create(draft("Al", 2, 100001)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn duplicate_card_is_rejected_without_mutation() {
        let registry = StudentRegistry::new();
        let first = registry.create(draft("Jo", 1, 100000)).unwrap();
        let err = registry.create(draft("Al", 2, 100000)).unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyExists));

        // First record unchanged, nothing else stored.
        assert_eq!(registry.get(first.id).unwrap(), first);
        assert_eq!(registry.list(None).len(), 1);
    }

    #[test]
    fn get_missing_is_not_found() {
        let registry = StudentRegistry::new();
        assert!(matches!(registry.get(42), Err(RegistryError::NotFound)));
    }

    #[test]
    fn delete_missing_is_not_found() {
        let registry = StudentRegistry::new();
        assert!(matches!(registry.delete(1), Err(RegistryError::NotFound)));
    }

    #[test]
    fn list_filters_by_course_with_stable_order() {
        let registry = StudentRegistry::new();
        registry.create(draft("Jo", 1, 100000)).unwrap();
        registry.create(draft("Al", 2, 100001)).unwrap();
        registry.create(draft("Cy", 1, 100002)).unwrap();

        let first_years = registry.list(Some(1));
        let names: Vec<&str> = first_years.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(names, vec!["Jo", "Cy"]);
        assert_eq!(registry.list(Some(1)), first_years);
        assert_eq!(registry.list(Some(3)).len(), 0);
        assert_eq!(registry.list(None).len(), 3);
    }

    #[test]
    fn delete_frees_card_but_not_id() {
        let registry = StudentRegistry::new();
        let a = registry.create(draft("Jo", 1, 100000)).unwrap();
        assert_eq!(a.id, 1);

        registry.delete(a.id).unwrap();
        assert!(matches!(registry.get(a.id), Err(RegistryError::NotFound)));

        let c = registry.create(draft("Cy", 1, 100000)).unwrap();
        assert_eq!(c.id, 2);
    }
}
