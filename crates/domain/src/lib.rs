mod comment;
mod notification;
mod shared;
mod tag;
mod task;
mod user;

pub use comment::Comment;
pub use notification::{
    classify_due_date, local_date_of_millis, local_date_start_millis, local_day_bounds_millis,
    Channel, Notification, ReminderCategory,
};
pub use shared::entity::{Entity, ID};
pub use tag::Tag;
pub use task::{Priority, Task, TaskType};
pub use user::User;
