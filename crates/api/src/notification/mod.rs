mod get_notification_debug;
pub mod send_task_reminders;

use actix_web::web;
use get_notification_debug::get_notification_debug_controller;
use send_task_reminders::trigger_notification_check_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/notifications/test",
        web::post().to(trigger_notification_check_controller),
    );
    cfg.route(
        "/notifications/debug",
        web::get().to(get_notification_debug_controller),
    );
}
