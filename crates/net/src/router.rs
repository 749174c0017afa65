use axum::{
    handler::Handler,
    routing::{get, post},
    Router,
};
use tracing::debug;

/// Merges per-route components into one router and binds the shared state.
///
/// Components may repeat a path with a different method; axum merges those
/// into a single method router.
pub fn main_router<STATE>(components: Vec<(String, Router<STATE>)>, state: STATE) -> Router
where
    STATE: Clone + Send + Sync + 'static,
{
    let mut app = Router::<STATE>::new();

    for (path, router) in components {
        debug!(%path, "registering route");
        app = app.merge(router);
    }

    app.with_state(state)
}

pub fn get_router_builder<T, S>(path: &str, handler: impl Handler<T, S>) -> (String, Router<S>)
where
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    (path.to_string(), Router::<S>::new().route(path, get(handler)))
}

pub fn post_router_builder<T, S>(path: &str, handler: impl Handler<T, S>) -> (String, Router<S>)
where
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    (path.to_string(), Router::<S>::new().route(path, post(handler)))
}
