use exam_notifier_domain::{PendingAssignment, Student, Subscription, ID};
use exam_notifier_infra::NotifierContext;
use std::collections::HashMap;

/// `Student` records of `student_ids`, keyed by student id. Ids without a
/// record are left out.
pub async fn find_students(
    student_ids: &[ID],
    ctx: &NotifierContext,
) -> anyhow::Result<HashMap<String, Student>> {
    if student_ids.is_empty() {
        return Ok(HashMap::new());
    }
    let students = ctx.repos.students.find_by_ids(student_ids).await?;
    Ok(students
        .into_iter()
        .map(|s| (s.id.as_string(), s))
        .collect())
}

/// Links every student id to its `User` id. The link stored on the
/// `Student` wins, otherwise a `User` linking back to the student is used.
/// Students without either are left out.
pub async fn resolve_user_links(
    student_ids: &[ID],
    students: &HashMap<String, Student>,
    ctx: &NotifierContext,
) -> anyhow::Result<HashMap<String, ID>> {
    let mut links = HashMap::new();
    let mut unlinked = Vec::new();
    for student_id in student_ids {
        let key = student_id.as_string();
        match students.get(&key).and_then(|s| s.user_id.clone()) {
            Some(user_id) => {
                links.insert(key, user_id);
            }
            None => unlinked.push(student_id.clone()),
        }
    }

    if !unlinked.is_empty() {
        for user in ctx.repos.users.find_by_student_ids(&unlinked).await? {
            if let Some(student_id) = user.student_id {
                links.entry(student_id.as_string()).or_insert(user.id);
            }
        }
    }

    Ok(links)
}

/// Active push `Subscription`s of the linked users, keyed by user id
pub async fn find_subscriptions(
    assignments: &[PendingAssignment],
    ctx: &NotifierContext,
) -> anyhow::Result<HashMap<String, Vec<Subscription>>> {
    let user_ids = assignments
        .iter()
        .filter_map(|a| a.identity.user_id.clone())
        .collect::<Vec<_>>();
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut subscriptions: HashMap<String, Vec<Subscription>> = HashMap::new();
    for subscription in ctx
        .repos
        .subscriptions
        .find_active_for_users(&user_ids)
        .await?
    {
        subscriptions
            .entry(subscription.user_id.as_string())
            .or_default()
            .push(subscription);
    }
    Ok(subscriptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_notifier_domain::User;

    #[actix_web::main]
    #[test]
    async fn it_prefers_the_link_on_the_student() {
        let ctx = NotifierContext::create_inmemory();
        let mut linked = Student::new("Linked");
        linked.user_id = Some(ID::default());
        let unlinked = Student::new("Unlinked");
        let orphan_id = ID::default();
        ctx.repos.students.insert(&linked).await.unwrap();
        ctx.repos.students.insert(&unlinked).await.unwrap();

        let reverse_for_linked = User::new(Some(linked.id.clone()));
        let reverse_for_unlinked = User::new(Some(unlinked.id.clone()));
        ctx.repos.users.insert(&reverse_for_linked).await.unwrap();
        ctx.repos.users.insert(&reverse_for_unlinked).await.unwrap();

        let ids = vec![linked.id.clone(), unlinked.id.clone(), orphan_id.clone()];
        let students = find_students(&ids, &ctx).await.unwrap();
        assert_eq!(students.len(), 2);

        let links = resolve_user_links(&ids, &students, &ctx).await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links.get(&linked.id.as_string()), linked.user_id.as_ref());
        assert_eq!(
            links.get(&unlinked.id.as_string()),
            Some(&reverse_for_unlinked.id)
        );
        assert!(links.get(&orphan_id.as_string()).is_none());
    }
}
