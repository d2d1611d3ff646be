use crate::shared::entity::{Entity, ID};

/// A `Student` as known by the enrollment system
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: ID,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// The `User` the attempt tracking system knows this `Student` as
    pub user_id: Option<ID>,
    pub batch_ids: Vec<String>,
    pub course_ids: Vec<String>,
}

impl Student {
    pub fn new(name: &str) -> Self {
        Self {
            id: Default::default(),
            name: name.to_string(),
            email: None,
            phone: None,
            user_id: None,
            batch_ids: Vec::new(),
            course_ids: Vec::new(),
        }
    }

    /// Email address if one is set and not blank
    pub fn contact_email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// Phone number if one is set and not blank
    pub fn contact_phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    pub fn in_any_batch(&self, batch_ids: &[String]) -> bool {
        self.batch_ids.iter().any(|b| batch_ids.contains(b))
    }

    pub fn in_any_course(&self, course_ids: &[String]) -> bool {
        self.course_ids.iter().any(|c| course_ids.contains(c))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl Entity for Student {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// An account in the attempt tracking system. Some `User`s link back to
/// the `Student` they belong to when the `Student` record lacks the link.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub student_id: Option<ID>,
}

impl User {
    pub fn new(student_id: Option<ID>) -> Self {
        Self {
            id: Default::default(),
            student_id,
        }
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
