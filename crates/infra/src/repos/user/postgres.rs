use super::IUserRepo;
use exam_notifier_domain::{User, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: Uuid,
    student_uid: Option<Uuid>,
}

impl From<UserRaw> for User {
    fn from(e: UserRaw) -> Self {
        Self {
            id: e.user_uid.into(),
            student_id: e.student_uid.map(|id| id.into()),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, student_uid)
            VALUES($1, $2)
            "#,
        )
        .bind(user.id.inner_ref())
        .bind(user.student_id.as_ref().map(|id| *id.inner_ref()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Unable to insert user: {:?}. DB returned error: {:?}",
                user, e
            );
            e
        })?;
        Ok(())
    }

    async fn find_by_student_ids(&self, student_ids: &[ID]) -> anyhow::Result<Vec<User>> {
        let ids = student_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        let users: Vec<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users
            WHERE student_uid = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find users for students: {:?} failed. DB returned error: {:?}",
                student_ids, e
            );
            e
        })?;
        Ok(users.into_iter().map(|u| u.into()).collect())
    }
}
