mod inmemory;
mod postgres;

pub use inmemory::InMemoryStudentRepo;
pub use postgres::PostgresStudentRepo;

use exam_notifier_domain::{Student, ID};

#[async_trait::async_trait]
pub trait IStudentRepo: Send + Sync {
    async fn insert(&self, student: &Student) -> anyhow::Result<()>;
    async fn find_by_ids(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>>;
    /// Students in one of `batch_ids` and in one of `course_ids`
    async fn find_by_batch_and_course(
        &self,
        batch_ids: &[String],
        course_ids: &[String],
    ) -> anyhow::Result<Vec<Student>>;
    async fn find_by_batch(&self, batch_ids: &[String]) -> anyhow::Result<Vec<Student>>;
    async fn find_by_course(&self, course_ids: &[String]) -> anyhow::Result<Vec<Student>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use exam_notifier_domain::Student;

    fn student_factory(name: &str, batch_id: &str, course_id: &str) -> Student {
        let mut student = Student::new(name);
        student.batch_ids = vec![batch_id.into()];
        student.course_ids = vec![course_id.into()];
        student
    }

    fn names(students: Vec<Student>) -> Vec<String> {
        students.into_iter().map(|s| s.name).collect()
    }

    #[tokio::test]
    async fn it_queries_by_membership() {
        let ctx = NotifierContext::create_inmemory();
        let s1 = student_factory("S1", "B1", "C1");
        let s2 = student_factory("S2", "B1", "C2");
        let s3 = student_factory("S3", "B2", "C1");
        for student in &[&s1, &s2, &s3] {
            ctx.repos.students.insert(student).await.unwrap();
        }
        let repo = &ctx.repos.students;
        let b1 = vec!["B1".to_string()];
        let c1 = vec!["C1".to_string()];

        let res = repo.find_by_batch_and_course(&b1, &c1).await.unwrap();
        assert_eq!(names(res), vec!["S1"]);
        let res = repo.find_by_batch(&b1).await.unwrap();
        assert_eq!(names(res), vec!["S1", "S2"]);
        let res = repo.find_by_course(&c1).await.unwrap();
        assert_eq!(names(res), vec!["S1", "S3"]);
        let res = repo.find_by_ids(&[s3.id.clone(), s2.id.clone()]).await.unwrap();
        assert_eq!(res.len(), 2);
        assert!(repo.find_by_batch(&[]).await.unwrap().is_empty());
    }
}
