mod auth;
mod comment;
mod notification;
mod status;
mod tag;
mod task;
mod user;

pub mod dtos {
    pub use crate::comment::dtos::*;
    pub use crate::notification::dtos::*;
    pub use crate::tag::dtos::*;
    pub use crate::task::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::auth::api::*;
pub use crate::comment::api::*;
pub use crate::notification::api::*;
pub use crate::status::api::*;
pub use crate::tag::api::*;
pub use crate::task::api::*;
pub use crate::user::api::*;
