use crate::{reminder::run_reminder_pass::RunReminderPassUseCase, shared::usecase::execute};
use actix_web::rt::time::{interval_at, Instant};
use exam_notifier_infra::NotifierContext;
use std::time::Duration;
use tracing::{info, info_span};
use tracing_futures::Instrument;

/// Period between two scheduled reminder passes, never zero
pub fn get_job_interval(interval_secs: u64) -> Duration {
    Duration::from_secs(std::cmp::max(interval_secs, 1))
}

/// The pass for one tick of the job, `None` while another run is in
/// progress
pub fn scheduled_reminder_pass(ctx: &NotifierContext) -> Option<RunReminderPassUseCase> {
    match ctx.run_guard.try_acquire() {
        Some(permit) => Some(RunReminderPassUseCase::all_channels().with_permit(permit)),
        None => {
            info!("A reminder pass is already running, skipping scheduled pass");
            None
        }
    }
}

/// Runs a reminder pass on every channel once per configured interval. The
/// first pass happens one interval after startup.
pub fn start_reminder_pass_job(ctx: NotifierContext) {
    actix_web::rt::spawn(async move {
        let period = get_job_interval(ctx.config.reminder_job_interval_secs);
        let mut interval = interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;

            let usecase = match scheduled_reminder_pass(&ctx) {
                Some(usecase) => usecase,
                None => continue,
            };
            let _ = execute(usecase, &ctx)
                .instrument(info_span!("Scheduled reminder pass"))
                .await;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_interval_is_never_zero() {
        assert_eq!(get_job_interval(0), Duration::from_secs(1));
        assert_eq!(get_job_interval(3600), Duration::from_secs(3600));
    }

    #[test]
    fn it_skips_the_tick_while_a_pass_is_running() {
        let ctx = NotifierContext::create_inmemory();
        let permit = ctx.run_guard.try_acquire();
        assert!(permit.is_some());
        assert!(scheduled_reminder_pass(&ctx).is_none());

        drop(permit);
        let usecase = scheduled_reminder_pass(&ctx);
        assert!(usecase.is_some());
        assert!(ctx.run_guard.is_running());
        drop(usecase);
        assert!(!ctx.run_guard.is_running());
    }
}
