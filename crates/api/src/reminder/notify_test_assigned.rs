use super::{
    dispatcher::Dispatcher,
    enrollment::resolve_enrollment,
    recipients::{find_students, find_subscriptions, resolve_user_links},
    settings_gate::load_channel_settings,
};
use crate::error::NotifierError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use exam_notifier_api_structs::notify_test_assigned::{APIResponse, PathParams, RequestBody};
use exam_notifier_domain::{
    Channel, NotificationKind, PendingTestsAggregator, ReminderPassReport, ID,
};
use exam_notifier_infra::NotifierContext;
use tracing::{info, info_span};
use tracing_futures::Instrument;

fn handle_error(e: UseCaseError) -> NotifierError {
    match e {
        UseCaseError::TestNotFound(id) => {
            NotifierError::NotFound(format!("The test with id: {}, was not found.", id))
        }
        UseCaseError::TestNotActive(id) => NotifierError::BadClientData(format!(
            "The test with id: {} has ended or is deactivated.",
            id
        )),
        UseCaseError::StorageError => NotifierError::InternalError,
    }
}

pub async fn notify_test_assigned_controller(
    ctx: web::Data<NotifierContext>,
    path: web::Path<PathParams>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, NotifierError> {
    let body = body.0;
    let usecase = NotifyTestAssignedUseCase {
        test_id: path.test_id.clone(),
        channels: body.channels.unwrap_or_else(Channel::all),
    };

    if body.wait.unwrap_or(false) {
        return execute(usecase, &ctx)
            .await
            .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
            .map_err(handle_error);
    }

    let ctx = ctx.get_ref().clone();
    actix_web::rt::spawn(
        async move {
            let _ = execute(usecase, &ctx).await;
        }
        .instrument(info_span!("Background test assigned notification")),
    );
    Ok(HttpResponse::Accepted().finish())
}

/// Tells every student entitled to a `Test` that it has been assigned to
/// them. Attempts are not considered.
#[derive(Debug)]
pub struct NotifyTestAssignedUseCase {
    pub test_id: ID,
    pub channels: Vec<Channel>,
}

#[derive(Debug)]
pub enum UseCaseError {
    TestNotFound(ID),
    TestNotActive(ID),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for NotifyTestAssignedUseCase {
    type Response = ReminderPassReport;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let test = match ctx.repos.tests.find(&self.test_id).await {
            Ok(Some(test)) => test,
            Ok(None) => return Err(UseCaseError::TestNotFound(self.test_id.clone())),
            Err(_) => return Err(UseCaseError::StorageError),
        };
        if !test.is_active(ctx.sys.get_timestamp_millis()) {
            return Err(UseCaseError::TestNotActive(self.test_id.clone()));
        }

        let mut report = ReminderPassReport::default();
        let settings = load_channel_settings(ctx).await;
        let channels = settings.enabled_among(&self.channels);
        if channels.is_empty() {
            info!(
                "None of the requested channels: {:?} are enabled, skipping test assigned notification",
                self.channels
            );
            return Ok(report);
        }
        report.active_tests = 1;

        let enrollment = resolve_enrollment(&test, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let mut aggregator = PendingTestsAggregator::new();
        aggregator.add_enrollment(&test, &enrollment);
        report.students_evaluated = aggregator.students_evaluated();

        let student_ids = aggregator.student_ids().to_vec();
        let students = find_students(&student_ids, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let user_links = resolve_user_links(&student_ids, &students, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let assignments = aggregator.into_assignments(&user_links);
        report.students_with_pending = assignments.len();

        let subscriptions = if channels.contains(&Channel::Push) {
            find_subscriptions(&assignments, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?
        } else {
            Default::default()
        };

        let mut dispatcher = Dispatcher::new(ctx, channels, NotificationKind::Assigned, report)
            .with_subscriptions(subscriptions);
        for assignment in &assignments {
            let student = students.get(&assignment.identity.as_student_key());
            dispatcher.dispatch(assignment, student).await;
        }
        Ok(dispatcher.into_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exam_notifier_domain::{Attempt, EmailTemplate, Student, Test};
    use exam_notifier_infra::{DeliveredMessage, Delivery, InMemoryDelivery};
    use std::sync::Arc;

    fn setup() -> (NotifierContext, Arc<InMemoryDelivery>) {
        let delivery = Arc::new(InMemoryDelivery::new());
        let mut ctx = NotifierContext::create_inmemory();
        ctx.config.delivery_delay_millis = 0;
        ctx.delivery = Delivery::single(delivery.clone());
        (ctx, delivery)
    }

    #[actix_web::main]
    #[test]
    async fn it_notifies_every_entitled_student() {
        let (ctx, delivery) = setup();
        let mut attempted = Student::new("S1");
        attempted.email = Some("s1@school.org".into());
        let mut fresh = Student::new("S2");
        fresh.email = Some("s2@school.org".into());
        ctx.repos.students.insert(&attempted).await.unwrap();
        ctx.repos.students.insert(&fresh).await.unwrap();
        let mut test = Test::new("T1", "Algebra");
        test.student_ids = vec![attempted.id.clone(), fresh.id.clone()];
        ctx.repos.tests.insert(&test).await.unwrap();
        ctx.repos
            .attempts
            .insert(&Attempt::by_student("T1", attempted.id.clone()))
            .await
            .unwrap();

        let mut usecase = NotifyTestAssignedUseCase {
            test_id: test.id.clone(),
            channels: vec![Channel::Email],
        };
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.students_with_pending, 2);
        assert_eq!(report.sent.email, 2);
        for message in delivery.messages() {
            match message {
                DeliveredMessage::Email {
                    subject, template, ..
                } => {
                    assert_eq!(subject, "New test assigned: Algebra");
                    assert_eq!(template, EmailTemplate::TestAssigned);
                }
                other => panic!("Expected an email, got: {:?}", other),
            }
        }
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_unknown_test() {
        let (ctx, _) = setup();
        let mut usecase = NotifyTestAssignedUseCase {
            test_id: ID::default(),
            channels: Channel::all(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::TestNotFound(_))));
    }

    #[actix_web::main]
    #[test]
    async fn it_rejects_deactivated_test() {
        let (ctx, _) = setup();
        let mut test = Test::new("T1", "Algebra");
        test.active = Some(false);
        ctx.repos.tests.insert(&test).await.unwrap();

        let mut usecase = NotifyTestAssignedUseCase {
            test_id: test.id.clone(),
            channels: Channel::all(),
        };
        let res = usecase.execute(&ctx).await;
        assert!(matches!(res, Err(UseCaseError::TestNotActive(_))));
    }

    #[actix_web::main]
    #[test]
    async fn it_notifies_while_a_reminder_pass_is_running() {
        let (ctx, delivery) = setup();
        let mut student = Student::new("S1");
        student.email = Some("s1@school.org".into());
        ctx.repos.students.insert(&student).await.unwrap();
        let mut test = Test::new("T1", "Algebra");
        test.student_ids = vec![student.id.clone()];
        ctx.repos.tests.insert(&test).await.unwrap();
        let _permit = ctx.run_guard.try_acquire().unwrap();

        let mut usecase = NotifyTestAssignedUseCase {
            test_id: test.id.clone(),
            channels: vec![Channel::Email],
        };
        let report = usecase.execute(&ctx).await.unwrap();

        assert_eq!(report.sent.email, 1);
        assert_eq!(delivery.messages().len(), 1);
    }
}
