use exam_notifier_domain::{
    exam_access_url, format_deadline, tokens_by_provider, Channel, EmailTemplate,
    NotificationKind, NotificationLog, PendingAssignment, PushData, ReminderMessage,
    ReminderPassReport, SmsTemplate, Student, Subscription, TemplateVars, Test,
};
use exam_notifier_infra::NotifierContext;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Delivers notifications for `PendingAssignment`s on the enabled
/// `Channel`s and collects the outcome in a `ReminderPassReport`.
///
/// Provider calls are made one at a time with a fixed pause in between.
/// A failing delivery only affects its own (student, channel) pair.
pub struct Dispatcher<'a> {
    ctx: &'a NotifierContext,
    channels: Vec<Channel>,
    kind: NotificationKind,
    now: i64,
    subscriptions: HashMap<String, Vec<Subscription>>,
    provider_calls: usize,
    report: ReminderPassReport,
}

/// What is sent to one student, derived from its most relevant `Test`
struct Notification<'t> {
    test: &'t Test,
    message: ReminderMessage,
    url: String,
    additional_pending: usize,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        ctx: &'a NotifierContext,
        channels: Vec<Channel>,
        kind: NotificationKind,
        report: ReminderPassReport,
    ) -> Self {
        Self {
            ctx,
            channels,
            kind,
            now: ctx.sys.get_timestamp_millis(),
            subscriptions: HashMap::new(),
            provider_calls: 0,
            report,
        }
    }

    /// Active push subscriptions keyed by user id
    pub fn with_subscriptions(mut self, subscriptions: HashMap<String, Vec<Subscription>>) -> Self {
        self.subscriptions = subscriptions;
        self
    }

    pub fn into_report(self) -> ReminderPassReport {
        self.report
    }

    /// `student` is `None` when the enrollment references a student without
    /// a record, in which case only push can reach it
    pub async fn dispatch(&mut self, assignment: &PendingAssignment, student: Option<&Student>) {
        let test = match assignment.first_test() {
            Some(test) => test,
            None => return,
        };
        let notification = self.notification(test, assignment.additional_tests());

        for channel in self.channels.clone() {
            match channel {
                Channel::Push => self.send_push(assignment, &notification).await,
                Channel::Email => match student.and_then(|s| s.contact_email()) {
                    Some(address) => {
                        let vars = self.template_vars(student, &notification);
                        self.send_email(assignment, address, &notification, &vars)
                            .await
                    }
                    None => debug!(
                        "Student: {} has no email address, skipping email",
                        assignment.identity.student_id
                    ),
                },
                Channel::Sms => match student.and_then(|s| s.contact_phone()) {
                    Some(phone) => {
                        let vars = self.template_vars(student, &notification);
                        self.send_sms(assignment, phone, &notification, &vars).await
                    }
                    None => debug!(
                        "Student: {} has no phone number, skipping sms",
                        assignment.identity.student_id
                    ),
                },
            }
        }
    }

    fn notification<'t>(&self, test: &'t Test, additional_pending: usize) -> Notification<'t> {
        let message = match self.kind {
            NotificationKind::Reminder => ReminderMessage::for_test(test, self.now),
            NotificationKind::Assigned => ReminderMessage::for_assigned_test(test, self.now),
        };
        let portal_url = &self.ctx.config.exam_portal_url;
        let url = match exam_access_url(portal_url, test) {
            Ok(url) => url.to_string(),
            Err(e) => {
                warn!(
                    "Unable to build exam url for test: {}, linking to the portal instead. Error: {:?}",
                    test.id, e
                );
                portal_url.to_string()
            }
        };
        Notification {
            test,
            message,
            url,
            additional_pending,
        }
    }

    fn template_vars(&self, student: Option<&Student>, notification: &Notification) -> TemplateVars {
        let test = notification.test;
        let mut vars = TemplateVars::new();
        if let Some(student) = student {
            vars.insert("student_name".into(), student.name.clone());
        }
        vars.insert("test_name".into(), test.name.clone());
        vars.insert("test_id".into(), test.test_id.clone());
        vars.insert("module".into(), test.module.clone());
        vars.insert("message".into(), notification.message.body.clone());
        vars.insert("url".into(), notification.url.clone());
        vars.insert(
            "additional_pending".into(),
            notification.additional_pending.to_string(),
        );
        if let Some(deadline) = format_deadline(test) {
            vars.insert("deadline".into(), deadline);
        }
        vars
    }

    async fn send_push(&mut self, assignment: &PendingAssignment, notification: &Notification<'_>) {
        let subscriptions = match assignment
            .identity
            .as_user_key()
            .and_then(|key| self.subscriptions.get(&key))
        {
            Some(subscriptions) => tokens_by_provider(subscriptions),
            None => Vec::new(),
        };
        if subscriptions.is_empty() {
            debug!(
                "Student: {} has no active push subscriptions, skipping push",
                assignment.identity.student_id
            );
            return;
        }

        let data = PushData {
            kind: self.kind,
            test_id: notification.test.test_id.clone(),
            test_name: notification.test.name.clone(),
            url: notification.url.clone(),
            additional_pending: notification.additional_pending,
        };
        let push = self.ctx.delivery.push.clone();
        for (provider, tokens) in subscriptions {
            if !push.supports(provider) {
                warn!(
                    "No push delivery is configured for provider: {}, skipping {} tokens of student: {}",
                    provider,
                    tokens.len(),
                    assignment.identity.student_id
                );
                continue;
            }
            self.throttle().await;
            let res = push
                .send(
                    provider,
                    &tokens,
                    &notification.message.title,
                    &notification.message.body,
                    &data,
                )
                .await;
            self.record(assignment, Channel::Push, notification, res)
                .await;
        }
    }

    async fn send_email(
        &mut self,
        assignment: &PendingAssignment,
        address: &str,
        notification: &Notification<'_>,
        vars: &TemplateVars,
    ) {
        self.throttle().await;
        let res = self
            .ctx
            .delivery
            .email
            .send(
                address,
                &notification.message.title,
                EmailTemplate::from(self.kind),
                vars,
            )
            .await;
        self.record(assignment, Channel::Email, notification, res)
            .await;
    }

    async fn send_sms(
        &mut self,
        assignment: &PendingAssignment,
        phone: &str,
        notification: &Notification<'_>,
        vars: &TemplateVars,
    ) {
        self.throttle().await;
        let res = self
            .ctx
            .delivery
            .sms
            .send(phone, SmsTemplate::from(self.kind), vars)
            .await;
        self.record(assignment, Channel::Sms, notification, res)
            .await;
    }

    /// Pauses before every provider call but the first
    async fn throttle(&mut self) {
        let delay = self.ctx.config.delivery_delay_millis;
        if self.provider_calls > 0 && delay > 0 {
            actix_web::rt::time::sleep(Duration::from_millis(delay)).await;
        }
        self.provider_calls += 1;
    }

    async fn record(
        &mut self,
        assignment: &PendingAssignment,
        channel: Channel,
        notification: &Notification<'_>,
        res: anyhow::Result<()>,
    ) {
        let student_id = &assignment.identity.student_id;
        let error = match res {
            Ok(_) => {
                self.report.record_sent(channel);
                None
            }
            Err(e) => {
                error!(
                    "Delivery on channel: {} for student: {} failed. Error: {:?}",
                    channel, student_id, e
                );
                let error = e.to_string();
                self.report
                    .record_failure(student_id, channel, error.clone());
                Some(error)
            }
        };

        let log = NotificationLog {
            id: Default::default(),
            student_id: student_id.clone(),
            test_id: notification.test.id.clone(),
            channel,
            kind: self.kind,
            success: error.is_none(),
            error,
            created: self.ctx.sys.get_timestamp_millis(),
        };
        if let Err(e) = self.ctx.repos.notification_logs.insert(&log).await {
            error!(
                "Unable to store notification log: {:?}. Error: {:?}",
                log, e
            );
        }
    }
}
