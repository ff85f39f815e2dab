//! HTTP surface for the board resources.
//!
//! Every handler answers with the `{success, ...}` envelope built in [`envelope`]; service
//! failures are mapped onto status codes in one place so the resource modules stay thin.

mod categories;
mod employers;
mod envelope;
mod jobs;
mod users;
mod webhooks;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::domain::{Employer, Job, User};
use super::service::BoardService;
use super::store::Collection;

/// Behaviour switches for the board router.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterOptions {
    /// Include upstream error detail in 500 responses. Disabled in production.
    pub expose_internal_errors: bool,
}

/// Shared handler state.
pub(crate) struct BoardContext<J, E, U> {
    pub(crate) service: Arc<BoardService<J, E, U>>,
    pub(crate) options: RouterOptions,
}

pub(crate) type SharedContext<J, E, U> = Arc<BoardContext<J, E, U>>;

/// Router exposing the job, employer, category, user and webhook endpoints.
pub fn board_router<J, E, U>(service: Arc<BoardService<J, E, U>>, options: RouterOptions) -> Router
where
    J: Collection<Job> + 'static,
    E: Collection<Employer> + 'static,
    U: Collection<User> + 'static,
{
    let context = Arc::new(BoardContext { service, options });

    Router::new()
        .route(
            "/api/jobs",
            get(jobs::list_handler::<J, E, U>).post(jobs::create_handler::<J, E, U>),
        )
        .route("/api/jobs/search", get(jobs::search_handler::<J, E, U>))
        .route("/api/jobs/stats/count", get(jobs::stats_handler::<J, E, U>))
        .route(
            "/api/jobs/:id",
            get(jobs::get_handler::<J, E, U>)
                .put(jobs::update_handler::<J, E, U>)
                .delete(jobs::delete_handler::<J, E, U>),
        )
        .route(
            "/api/employers",
            get(employers::list_handler::<J, E, U>).post(employers::create_handler::<J, E, U>),
        )
        .route(
            "/api/employers/stats/count",
            get(employers::stats_handler::<J, E, U>),
        )
        .route(
            "/api/employers/:id",
            get(employers::get_handler::<J, E, U>)
                .put(employers::update_handler::<J, E, U>)
                .delete(employers::delete_handler::<J, E, U>),
        )
        .route(
            "/api/employers/:id/jobs",
            get(employers::jobs_handler::<J, E, U>),
        )
        .route("/api/categories", get(categories::list_handler::<J, E, U>))
        .route(
            "/api/categories/:name/jobs",
            get(categories::jobs_handler::<J, E, U>),
        )
        .route(
            "/api/users/me",
            get(users::me_handler::<J, E, U>).put(users::update_handler::<J, E, U>),
        )
        .route(
            "/api/users/me/applications",
            post(users::apply_handler::<J, E, U>),
        )
        .route(
            "/api/users/me/saved-jobs",
            post(users::save_handler::<J, E, U>),
        )
        .route(
            "/api/webhooks/clerk",
            post(webhooks::clerk_handler::<J, E, U>),
        )
        .with_state(context)
}
