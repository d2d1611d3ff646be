use exam_notifier_domain::{Enrollment, EnrollmentQuery, PendingTestsAggregator, Student, Test};
use exam_notifier_infra::NotifierContext;
use futures::future::try_join_all;

/// Everyone entitled to take `test`: the directly assigned students plus
/// the students matched by its batch and course descriptors
pub async fn resolve_enrollment(test: &Test, ctx: &NotifierContext) -> anyhow::Result<Enrollment> {
    let matched: Vec<Student> = match test.enrollment_query() {
        EnrollmentQuery::BatchAndCourse {
            batch_ids,
            course_ids,
        } => {
            ctx.repos
                .students
                .find_by_batch_and_course(&batch_ids, &course_ids)
                .await?
        }
        EnrollmentQuery::Batch(batch_ids) => ctx.repos.students.find_by_batch(&batch_ids).await?,
        EnrollmentQuery::Course(course_ids) => {
            ctx.repos.students.find_by_course(&course_ids).await?
        }
        EnrollmentQuery::None => Vec::new(),
    };

    Ok(Enrollment::union(
        &test.student_ids,
        matched.into_iter().map(|s| s.id),
    ))
}

/// Resolves the enrollment of every `Test` concurrently and unions them per
/// student, in the order of `tests`
pub async fn aggregate_enrollments(
    tests: &[Test],
    ctx: &NotifierContext,
) -> anyhow::Result<PendingTestsAggregator> {
    let enrollments =
        try_join_all(tests.iter().map(|test| resolve_enrollment(test, ctx))).await?;

    let mut aggregator = PendingTestsAggregator::new();
    for (test, enrollment) in tests.iter().zip(enrollments.iter()) {
        aggregator.add_enrollment(test, enrollment);
    }
    Ok(aggregator)
}
