mod dispatcher;
mod enrollment;
mod notify_test_assigned;
mod recipients;
pub mod run_reminder_pass;
mod settings_gate;

use actix_web::web;
use notify_test_assigned::notify_test_assigned_controller;
use run_reminder_pass::run_reminder_pass_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/run",
        web::post().to(run_reminder_pass_controller),
    );
    cfg.route(
        "/tests/{test_id}/notify-assigned",
        web::post().to(notify_test_assigned_controller),
    );
}
