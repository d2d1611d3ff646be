use crate::{shared::entity::ID, student::Student};
use itertools::Itertools;

/// The student query needed to find everyone a `Test` is assigned to
/// through batch or course membership
#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentQuery {
    /// Students in one of the batches AND one of the courses
    BatchAndCourse {
        batch_ids: Vec<String>,
        course_ids: Vec<String>,
    },
    Batch(Vec<String>),
    Course(Vec<String>),
    /// Only direct assignments apply
    None,
}

impl EnrollmentQuery {
    pub fn matches(&self, student: &Student) -> bool {
        match self {
            Self::BatchAndCourse {
                batch_ids,
                course_ids,
            } => student.in_any_batch(batch_ids) && student.in_any_course(course_ids),
            Self::Batch(batch_ids) => student.in_any_batch(batch_ids),
            Self::Course(course_ids) => student.in_any_course(course_ids),
            Self::None => false,
        }
    }
}

/// Everyone entitled to take one `Test`, deduplicated and in the order
/// they were first seen: direct assignments first, then query matches.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enrollment {
    student_ids: Vec<ID>,
}

impl Enrollment {
    pub fn union(direct: &[ID], matched: impl IntoIterator<Item = ID>) -> Self {
        let student_ids = direct
            .iter()
            .cloned()
            .chain(matched)
            .unique_by(|id| id.as_string())
            .collect();
        Self { student_ids }
    }

    pub fn student_ids(&self) -> &[ID] {
        &self.student_ids
    }

    pub fn into_student_ids(self) -> Vec<ID> {
        self.student_ids
    }

    pub fn len(&self) -> usize {
        self.student_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.student_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_keeps_each_student_once() {
        let s1 = ID::new();
        let s2 = ID::new();
        let s3 = ID::new();
        let enrollment = Enrollment::union(
            &[s1.clone(), s2.clone(), s1.clone()],
            vec![s2.clone(), s3.clone(), s3.clone()],
        );
        assert_eq!(enrollment.student_ids(), &[s1, s2, s3]);
    }

    #[test]
    fn union_of_nothing_is_empty() {
        let enrollment = Enrollment::union(&[], Vec::new());
        assert!(enrollment.is_empty());
    }

    #[test]
    fn batch_and_course_requires_both_memberships() {
        let query = EnrollmentQuery::BatchAndCourse {
            batch_ids: vec!["B1".into()],
            course_ids: vec!["C1".into()],
        };
        let mut s1 = Student::new("S1");
        s1.batch_ids = vec!["B1".into()];
        s1.course_ids = vec!["C1".into()];
        let mut s2 = Student::new("S2");
        s2.batch_ids = vec!["B1".into()];
        s2.course_ids = vec!["C2".into()];

        assert!(query.matches(&s1));
        assert!(!query.matches(&s2));
        assert!(EnrollmentQuery::Batch(vec!["B1".into()]).matches(&s2));
        assert!(!EnrollmentQuery::None.matches(&s1));
    }
}
