use super::IStudentRepo;
use crate::repos::shared::inmemory_repo::*;
use exam_notifier_domain::{EnrollmentQuery, Student, ID};

pub struct InMemoryStudentRepo {
    students: std::sync::Mutex<Vec<Student>>,
}

impl InMemoryStudentRepo {
    pub fn new() -> Self {
        Self {
            students: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn find_matching(&self, query: EnrollmentQuery) -> Vec<Student> {
        find_by(&self.students, |s| query.matches(s))
    }
}

#[async_trait::async_trait]
impl IStudentRepo for InMemoryStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        insert(student, &self.students);
        Ok(())
    }

    async fn find_by_ids(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>> {
        Ok(find_by(&self.students, |s| student_ids.contains(&s.id)))
    }

    async fn find_by_batch_and_course(
        &self,
        batch_ids: &[String],
        course_ids: &[String],
    ) -> anyhow::Result<Vec<Student>> {
        Ok(self.find_matching(EnrollmentQuery::BatchAndCourse {
            batch_ids: batch_ids.to_vec(),
            course_ids: course_ids.to_vec(),
        }))
    }

    async fn find_by_batch(&self, batch_ids: &[String]) -> anyhow::Result<Vec<Student>> {
        Ok(self.find_matching(EnrollmentQuery::Batch(batch_ids.to_vec())))
    }

    async fn find_by_course(&self, course_ids: &[String]) -> anyhow::Result<Vec<Student>> {
        Ok(self.find_matching(EnrollmentQuery::Course(course_ids.to_vec())))
    }
}
