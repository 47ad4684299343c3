pub use crate::common::RouteResult;

use axum::{extract::FromRef, routing::on, Router};
use database::PgDatabase;
use tokio::net::TcpListener;
use wifi_points::client::Client;

pub mod api;
pub mod common;
pub mod hateoas;

#[derive(Clone, FromRef)]
pub struct WebState {
    pub wifi_client: Client<PgDatabase>,
}

pub async fn start_web_server(state: WebState) -> std::io::Result<()> {
    let routes = Router::new()
        .nest_service("/api", api::routes(state))
        .fallback_service(on(common::METHOD_FILTER_ALL, common::route_not_found));

    let listener = TcpListener::bind("0.0.0.0:8080").await?;
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
