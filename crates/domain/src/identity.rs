use crate::shared::entity::ID;

/// A student as seen from both identity spaces: the enrollment system
/// knows it by `student_id`, the attempt tracking system by `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub student_id: ID,
    pub user_id: Option<ID>,
}

impl Identity {
    pub fn new(student_id: ID) -> Self {
        Self {
            student_id,
            user_id: None,
        }
    }

    pub fn with_user(student_id: ID, user_id: Option<ID>) -> Self {
        Self {
            student_id,
            user_id,
        }
    }

    pub fn as_student_key(&self) -> String {
        self.student_id.as_string()
    }

    pub fn as_user_key(&self) -> Option<String> {
        self.user_id.as_ref().map(|id| id.as_string())
    }
}
