use super::IStudentRepo;
use exam_notifier_domain::{Student, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresStudentRepo {
    pool: PgPool,
}

impl PostgresStudentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StudentRaw {
    student_uid: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    user_uid: Option<Uuid>,
    batch_ids: Vec<String>,
    course_ids: Vec<String>,
}

impl From<StudentRaw> for Student {
    fn from(e: StudentRaw) -> Self {
        Self {
            id: e.student_uid.into(),
            name: e.name,
            email: e.email,
            phone: e.phone,
            user_id: e.user_uid.map(|id| id.into()),
            batch_ids: e.batch_ids,
            course_ids: e.course_ids,
        }
    }
}

fn into_students(
    res: Result<Vec<StudentRaw>, sqlx::Error>,
    description: &str,
) -> anyhow::Result<Vec<Student>> {
    let students = res.map_err(|e| {
        error!(
            "Find students {} failed. DB returned error: {:?}",
            description, e
        );
        e
    })?;
    Ok(students.into_iter().map(|s| s.into()).collect())
}

#[async_trait::async_trait]
impl IStudentRepo for PostgresStudentRepo {
    async fn insert(&self, student: &Student) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO students
            (student_uid, name, email, phone, user_uid, batch_ids, course_ids)
            VALUES($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(student.id.inner_ref())
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.user_id.as_ref().map(|id| *id.inner_ref()))
        .bind(student.batch_ids.clone())
        .bind(student.course_ids.clone())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert student: {:?}. DB returned error: {:?}",
                student, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_ids(&self, student_ids: &[ID]) -> anyhow::Result<Vec<Student>> {
        let ids = student_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let res: Result<Vec<StudentRaw>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT * FROM students
            WHERE student_uid = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        into_students(res, &format!("with ids: {:?}", student_ids))
    }

    async fn find_by_batch_and_course(
        &self,
        batch_ids: &[String],
        course_ids: &[String],
    ) -> anyhow::Result<Vec<Student>> {
        let res: Result<Vec<StudentRaw>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT * FROM students
            WHERE batch_ids && $1 AND course_ids && $2
            "#,
        )
        .bind(batch_ids.to_vec())
        .bind(course_ids.to_vec())
        .fetch_all(&self.pool)
        .await;
        into_students(res, &format!("in batches: {:?} and courses: {:?}", batch_ids, course_ids))
    }

    async fn find_by_batch(&self, batch_ids: &[String]) -> anyhow::Result<Vec<Student>> {
        let res: Result<Vec<StudentRaw>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT * FROM students
            WHERE batch_ids && $1
            "#,
        )
        .bind(batch_ids.to_vec())
        .fetch_all(&self.pool)
        .await;
        into_students(res, &format!("in batches: {:?}", batch_ids))
    }

    async fn find_by_course(&self, course_ids: &[String]) -> anyhow::Result<Vec<Student>> {
        let res: Result<Vec<StudentRaw>, sqlx::Error> = sqlx::query_as(
            r#"
            SELECT * FROM students
            WHERE course_ids && $1
            "#,
        )
        .bind(course_ids.to_vec())
        .fetch_all(&self.pool)
        .await;
        into_students(res, &format!("in courses: {:?}", course_ids))
    }
}
