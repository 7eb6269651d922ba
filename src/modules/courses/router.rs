use axum::{Router, routing::get};

use crate::modules::courses::controller::{
    create_course, delete_course, get_course, list_courses, update_course,
};
use crate::state::AppState;

/// Each path is also served with a trailing slash.
pub fn init_courses_router() -> Router<AppState> {
    let collection = get(list_courses).post(create_course);
    let item = get(get_course).put(update_course).delete(delete_course);

    Router::new()
        .route("/courses", collection.clone())
        .route("/courses/", collection)
        .route("/courses/{id}", item.clone())
        .route("/courses/{id}/", item)
}
