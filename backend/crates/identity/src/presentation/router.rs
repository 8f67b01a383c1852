//! Identity Router

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::domain::repository::AccountRepository;
use crate::presentation::handlers::{self, IdentityState};
use crate::presentation::middleware::{require_admin, require_authentication};

/// Account routes, to be nested under `/api/users`
///
/// Public: register, login, logout. Authenticated: own profile.
/// Admin: list, fetch and delete accounts.
pub fn account_router<R>(state: IdentityState<R>) -> Router
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/", post(handlers::register::<R>))
        .route("/auth", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>));

    let admin = Router::new()
        .route("/", get(handlers::list_accounts::<R>))
        .route(
            "/{id}",
            get(handlers::get_account::<R>).delete(handlers::delete_account::<R>),
        )
        .route_layer(from_fn(require_admin));

    let authenticated = Router::new()
        .route(
            "/profile",
            get(handlers::get_profile).put(handlers::update_profile::<R>),
        )
        .merge(admin)
        .route_layer(from_fn_with_state(
            state.clone(),
            require_authentication::<R>,
        ));

    public.merge(authenticated).with_state(state)
}
