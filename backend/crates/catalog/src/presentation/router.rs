//! Catalog Router

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
};
use identity::domain::repository::AccountRepository;
use identity::{IdentityState, require_admin, require_authentication};

use crate::domain::repository::ProductRepository;
use crate::presentation::handlers::{self, CatalogState};

/// Product routes, to be nested under `/api/products`
///
/// Authentication reuses the identity gates, so sessions issued by the
/// account router are honored here.
pub fn product_router<P, R>(state: CatalogState<P>, identity: IdentityState<R>) -> Router
where
    P: ProductRepository + Clone + Send + Sync + 'static,
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let public = Router::new()
        .route("/top", get(handlers::top_products::<P>))
        .route("/{id}", get(handlers::get_product::<P>));

    let admin = Router::new()
        .route("/", post(handlers::create_product::<P>))
        .route(
            "/{id}",
            put(handlers::update_product::<P>).delete(handlers::delete_product::<P>),
        )
        .route_layer(from_fn(require_admin));

    let authenticated = Router::new()
        .route("/{id}/reviews", post(handlers::add_review::<P>))
        .merge(admin)
        .route_layer(from_fn_with_state(identity, require_authentication::<R>));

    public.merge(authenticated).with_state(state)
}
