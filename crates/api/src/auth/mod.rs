mod login;
pub mod register;

use actix_web::web;
use login::login_controller;
use register::register_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register_controller));
    cfg.route("/auth/login", web::post().to(login_controller));
}
