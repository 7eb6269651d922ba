use axum::{Router, routing::get};

use crate::modules::users::controller::{create_user, get_current_user};
use crate::state::AppState;

/// Each path is also served with a trailing slash.
pub fn init_users_router() -> Router<AppState> {
    let users = get(get_current_user).post(create_user);

    Router::new()
        .route("/users", users.clone())
        .route("/users/", users)
}
