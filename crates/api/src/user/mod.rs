mod get_users;
mod update_notifications_enabled;
mod update_telegram_chat_id;

use actix_web::web;
use get_users::get_users_controller;
use update_notifications_enabled::update_notifications_enabled_controller;
use update_telegram_chat_id::update_telegram_chat_id_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::get().to(get_users_controller));
    cfg.route(
        "/users/telegram-chat-id",
        web::put().to(update_telegram_chat_id_controller),
    );
    cfg.route(
        "/users/notifications-enabled",
        web::put().to(update_notifications_enabled_controller),
    );
}
