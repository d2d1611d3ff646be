use crate::{
    attempt::AttemptIndex, enrollment::Enrollment, identity::Identity, shared::entity::ID,
    test::Test,
};
use std::collections::HashMap;

/// A student together with the `Test`s it is entitled to but has not
/// attempted
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAssignment {
    pub identity: Identity,
    pub tests: Vec<Test>,
}

impl PendingAssignment {
    /// Closest deadline first. Tests without a deadline go last and ties
    /// keep their original order.
    pub fn sort_by_deadline(&mut self) {
        self.tests
            .sort_by_key(|t| (t.end_ts.is_none(), t.end_ts.unwrap_or(i64::MAX)));
    }

    /// The `Test` used when only one can be mentioned
    pub fn first_test(&self) -> Option<&Test> {
        self.tests.first()
    }

    pub fn additional_tests(&self) -> usize {
        self.tests.len().saturating_sub(1)
    }
}

/// Builds the per student lists of pending `Test`s.
///
/// Enrollments are appended per `Test` into a student -> tests multimap,
/// after which attempts are filtered out in two passes: first against the
/// student identity space, then, once the linked `User`s are known,
/// against both identity spaces.
#[derive(Debug, Default)]
pub struct PendingTestsAggregator {
    // Insertion order of students
    students: Vec<ID>,
    entitled: HashMap<String, Vec<Test>>,
}

impl PendingTestsAggregator {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_enrollment(&mut self, test: &Test, enrollment: &Enrollment) {
        for student_id in enrollment.student_ids() {
            let key = student_id.as_string();
            if !self.entitled.contains_key(&key) {
                self.students.push(student_id.clone());
            }
            let tests = self.entitled.entry(key).or_default();
            if !tests.iter().any(|t| t.id == test.id) {
                tests.push(test.clone());
            }
        }
    }

    /// Number of distinct students entitled to at least one `Test`
    pub fn students_evaluated(&self) -> usize {
        self.students.len()
    }

    /// Remaining students, in the order they were first seen
    pub fn student_ids(&self) -> &[ID] {
        &self.students
    }

    /// First pass: removes `Test`s attempted under the student identity.
    /// Students left without `Test`s are dropped.
    pub fn remove_student_attempts(&mut self, index: &AttemptIndex) {
        let entitled = &mut self.entitled;
        self.students.retain(|student_id| {
            let key = student_id.as_string();
            let identity = Identity::new(student_id.clone());
            let tests = match entitled.get_mut(&key) {
                Some(tests) => tests,
                None => return false,
            };
            tests.retain(|test| !index.attempted_as_student(&identity, test));
            if tests.is_empty() {
                entitled.remove(&key);
                false
            } else {
                true
            }
        });
    }

    /// Second pass: attaches the linked `User` ids and removes `Test`s
    /// attempted under either identity
    pub fn reconcile(
        self,
        user_links: &HashMap<String, ID>,
        index: &AttemptIndex,
    ) -> Vec<PendingAssignment> {
        self.into_assignments(user_links)
            .into_iter()
            .filter_map(|mut assignment| {
                let identity = &assignment.identity;
                assignment
                    .tests
                    .retain(|test| !index.attempted(identity, test));
                if assignment.tests.is_empty() {
                    None
                } else {
                    Some(assignment)
                }
            })
            .collect()
    }

    /// Every entitled student with all of its `Test`s, ignoring attempts
    pub fn into_assignments(mut self, user_links: &HashMap<String, ID>) -> Vec<PendingAssignment> {
        let mut assignments = Vec::with_capacity(self.students.len());
        for student_id in self.students {
            let key = student_id.as_string();
            let tests = match self.entitled.remove(&key) {
                Some(tests) => tests,
                None => continue,
            };
            let user_id = user_links.get(&key).cloned();
            assignments.push(PendingAssignment {
                identity: Identity::with_user(student_id, user_id),
                tests,
            });
        }
        assignments
    }
}
