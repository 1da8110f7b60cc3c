mod create_tag;
mod delete_tag;
mod get_tag;
mod get_tags;
mod update_tag;

use actix_web::web;
use create_tag::create_tag_controller;
use delete_tag::delete_tag_controller;
use get_tag::get_tag_controller;
use get_tags::get_tags_controller;
use update_tag::update_tag_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/tags", web::get().to(get_tags_controller));
    cfg.route("/tags", web::post().to(create_tag_controller));
    cfg.route("/tags/{tag_id}", web::get().to(get_tag_controller));
    cfg.route("/tags/{tag_id}", web::put().to(update_tag_controller));
    cfg.route("/tags/{tag_id}", web::delete().to(delete_tag_controller));
}
