mod create_comment;
mod delete_comment;
mod get_comment;
mod get_comments;
mod update_comment;

use actix_web::web;
use create_comment::create_comment_controller;
use delete_comment::delete_comment_controller;
use get_comment::get_comment_controller;
use get_comments::get_comments_controller;
use update_comment::update_comment_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/tasks/{task_id}/comments",
        web::get().to(get_comments_controller),
    );
    cfg.route("/comments", web::post().to(create_comment_controller));
    cfg.route("/comments/{comment_id}", web::get().to(get_comment_controller));
    cfg.route(
        "/comments/{comment_id}",
        web::put().to(update_comment_controller),
    );
    cfg.route(
        "/comments/{comment_id}",
        web::delete().to(delete_comment_controller),
    );
}
