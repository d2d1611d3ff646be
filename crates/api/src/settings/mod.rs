mod get_channel_settings;
mod update_channel_settings;

use actix_web::web;
use get_channel_settings::get_channel_settings_controller;
use update_channel_settings::update_channel_settings_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/settings/channels",
        web::get().to(get_channel_settings_controller),
    );
    cfg.route(
        "/settings/channels",
        web::put().to(update_channel_settings_controller),
    );
}
