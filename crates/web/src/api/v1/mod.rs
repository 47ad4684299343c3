use axum::{
    routing::{get, on},
    Router,
};

use crate::{
    common::{route_not_found, route_not_implemented, METHOD_FILTER_ALL},
    WebState,
};

mod access_points;

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::resource!("/v1{}", format_args!($($arg)*))
    };
}
pub(crate) use resource;

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(route_not_implemented))
        .nest_service("/access-points", access_points::routes(state))
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}
