pub mod create_task;
mod delete_task;
mod get_task;
mod get_tasks;
mod share_task;
mod unshare_task;
mod update_task;

use actix_web::web;
use create_task::create_task_controller;
use delete_task::delete_task_controller;
use get_task::get_task_controller;
use get_tasks::{get_assigned_tasks_controller, get_tasks_controller};
use share_task::share_task_controller;
use unshare_task::unshare_task_controller;
use update_task::update_task_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tasks", web::post().to(create_task_controller));
    cfg.route("/tasks", web::get().to(get_tasks_controller));
    cfg.route("/tasks/assigned", web::get().to(get_assigned_tasks_controller));
    cfg.route("/tasks/{task_id}", web::get().to(get_task_controller));
    cfg.route("/tasks/{task_id}", web::put().to(update_task_controller));
    cfg.route("/tasks/{task_id}", web::delete().to(delete_task_controller));
    cfg.route("/tasks/{task_id}/share", web::post().to(share_task_controller));
    cfg.route(
        "/tasks/{task_id}/share/{user_id}",
        web::delete().to(unshare_task_controller),
    );
}
