use super::{
    dispatcher::Dispatcher,
    enrollment::aggregate_enrollments,
    recipients::{find_students, find_subscriptions, resolve_user_links},
    settings_gate::load_channel_settings,
};
use crate::error::NotifierError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use exam_notifier_api_structs::run_reminder_pass::{APIResponse, RequestBody};
use exam_notifier_domain::{AttemptIndex, Channel, NotificationKind, ReminderPassReport, Test};
use exam_notifier_infra::{NotifierContext, RunPermit};
use itertools::Itertools;
use tracing::{info, info_span};
use tracing_futures::Instrument;

fn handle_error(e: UseCaseError) -> NotifierError {
    match e {
        UseCaseError::AlreadyRunning => {
            NotifierError::Conflict("A reminder pass is already running.".into())
        }
        UseCaseError::StorageError => NotifierError::InternalError,
    }
}

pub async fn run_reminder_pass_controller(
    ctx: web::Data<NotifierContext>,
    body: web::Json<RequestBody>,
) -> Result<HttpResponse, NotifierError> {
    let body = body.0;
    let usecase = RunReminderPassUseCase::new(body.channels.unwrap_or_else(Channel::all));

    if body.wait.unwrap_or(false) {
        return execute(usecase, &ctx)
            .await
            .map(|report| HttpResponse::Ok().json(APIResponse::new(report)))
            .map_err(handle_error);
    }

    // The permit moves into the background task so no other run can start
    // between accepting the request and starting the pass
    let permit = ctx
        .run_guard
        .try_acquire()
        .ok_or_else(|| handle_error(UseCaseError::AlreadyRunning))?;
    let usecase = usecase.with_permit(permit);
    let ctx = ctx.get_ref().clone();
    actix_web::rt::spawn(
        async move {
            let _ = execute(usecase, &ctx).await;
        }
        .instrument(info_span!("Background reminder pass")),
    );
    Ok(HttpResponse::Accepted().finish())
}

/// Reminds every student of the active `Test`s it is entitled to but has
/// not attempted yet, on the requested `Channel`s that are enabled.
#[derive(Debug)]
pub struct RunReminderPassUseCase {
    pub channels: Vec<Channel>,
    /// Acquired by the caller ahead of time, otherwise acquired on execute
    pub permit: Option<RunPermit>,
}

impl RunReminderPassUseCase {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self {
            channels,
            permit: None,
        }
    }

    pub fn all_channels() -> Self {
        Self::new(Channel::all())
    }

    pub fn with_permit(mut self, permit: RunPermit) -> Self {
        self.permit = Some(permit);
        self
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    AlreadyRunning,
    StorageError,
}

/// Every identifier attempts may use to reference one of `tests`
fn test_references(tests: &[Test]) -> Vec<String> {
    tests
        .iter()
        .flat_map(|t| t.reference_keys())
        .unique()
        .collect()
}

#[async_trait::async_trait(?Send)]
impl UseCase for RunReminderPassUseCase {
    type Response = ReminderPassReport;

    type Errors = UseCaseError;

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let _permit = match self.permit.take() {
            Some(permit) => permit,
            None => ctx
                .run_guard
                .try_acquire()
                .ok_or(UseCaseError::AlreadyRunning)?,
        };

        let mut report = ReminderPassReport::default();
        let settings = load_channel_settings(ctx).await;
        let channels = settings.enabled_among(&self.channels);
        if channels.is_empty() {
            info!(
                "None of the requested channels: {:?} are enabled, skipping reminder pass",
                self.channels
            );
            return Ok(report);
        }

        let now = ctx.sys.get_timestamp_millis();
        let tests = ctx
            .repos
            .tests
            .find_active(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        report.active_tests = tests.len();

        let mut aggregator = aggregate_enrollments(&tests, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        report.students_evaluated = aggregator.students_evaluated();
        if report.students_evaluated == 0 {
            return Ok(report);
        }

        let attempts = ctx
            .repos
            .attempts
            .find_for_tests(&test_references(&tests))
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let index = AttemptIndex::build(&tests, &attempts);
        aggregator.remove_student_attempts(&index);

        let student_ids = aggregator.student_ids().to_vec();
        let students = find_students(&student_ids, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let user_links = resolve_user_links(&student_ids, &students, ctx)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut assignments = aggregator.reconcile(&user_links, &index);
        report.students_with_pending = assignments.len();
        for assignment in assignments.iter_mut() {
            assignment.sort_by_deadline();
        }

        let subscriptions = if channels.contains(&Channel::Push) {
            find_subscriptions(&assignments, ctx)
                .await
                .map_err(|_| UseCaseError::StorageError)?
        } else {
            Default::default()
        };

        let mut dispatcher = Dispatcher::new(ctx, channels, NotificationKind::Reminder, report)
            .with_subscriptions(subscriptions);
        for assignment in &assignments {
            let student = students.get(&assignment.identity.as_student_key());
            dispatcher.dispatch(assignment, student).await;
        }
        let report = dispatcher.into_report();

        info!(
            "Reminder pass done. Active tests: {}, students evaluated: {}, students with pending tests: {}, sent: {}, failed: {}",
            report.active_tests,
            report.students_evaluated,
            report.students_with_pending,
            report.sent.total(),
            report.failed.total()
        );
        Ok(report)
    }
}
