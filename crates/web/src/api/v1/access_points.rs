use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::Method,
    routing::{get, on},
    Extension, Json, Router,
};
use axum_extra::extract::Query;
use model::{access_point::AccessPoint, page::Page, WithDistance};
use serde::Deserialize;

use crate::{
    common::{
        route_not_found, schema, schema_no_example, HateoasResult,
        RouteErrorResponse, VecResponse, METHOD_FILTER_ALL,
    },
    hateoas::{self, base_url_middleware, BaseUrl},
    WebState,
};

macro_rules! resource {
    ($($arg:tt)*) => {
        crate::api::v1::resource!("/access-points{}", format_args!($($arg)*))
    };
}

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/schema", get(schema::<AccessPoint>))
        .route("/:id", get(get_access_point))
        .route("/", get(get_access_points))
        .route("/colonia", get(get_access_points_by_colonia))
        .route("/proximity", get(get_access_points_by_proximity))
        .route(
            "/proximity/schema",
            get(schema_no_example::<WithDistance<AccessPoint>>),
        )
        .layer(axum::middleware::from_fn(base_url_middleware))
        .with_state(state)
        .fallback_service(on(METHOD_FILTER_ALL, route_not_found))
}

#[derive(Deserialize)]
struct PageQuery {
    page: Option<usize>,
    size: Option<usize>,
    #[serde(default)]
    sort: Vec<String>,
}

#[derive(Deserialize)]
struct ColoniaQuery {
    colonia: String,
    page: Option<usize>,
    size: Option<usize>,
    #[serde(default)]
    sort: Vec<String>,
}

#[derive(Deserialize)]
struct ProximityQuery {
    latitude: f64,
    longitude: f64,
    distance: Option<f64>,
    page: Option<usize>,
    size: Option<usize>,
}

async fn get_access_points(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { wifi_client }): State<WebState>,
    Query(params): Query<PageQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<AccessPoint>>> {
    wifi_client
        .find_all(params.page, params.size, &params.sort)
        .await
        .map(|page| page_response(page, base_url, access_point_hateoas))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_access_point(
    OriginalUri(original_uri): OriginalUri,
    Path(id): Path<i64>,
    State(WebState { wifi_client }): State<WebState>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<AccessPoint> {
    wifi_client
        .find_by_id(id)
        .await
        .map(|point| access_point_hateoas(point, base_url).json())
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_access_points_by_colonia(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { wifi_client }): State<WebState>,
    Query(params): Query<ColoniaQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<AccessPoint>>> {
    wifi_client
        .find_by_colonia(&params.colonia, params.page, params.size, &params.sort)
        .await
        .map(|page| page_response(page, base_url, access_point_hateoas))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

async fn get_access_points_by_proximity(
    OriginalUri(original_uri): OriginalUri,
    State(WebState { wifi_client }): State<WebState>,
    Query(params): Query<ProximityQuery>,
    Extension(base_url): Extension<Arc<BaseUrl>>,
) -> HateoasResult<VecResponse<hateoas::Response<WithDistance<AccessPoint>>>> {
    wifi_client
        .find_by_proximity(
            params.latitude,
            params.longitude,
            params.distance,
            params.page,
            params.size,
        )
        .await
        .map(|page| page_response(page, base_url, access_point_with_distance_hateoas))
        .map_err(|why| {
            RouteErrorResponse::from(why)
                .with_method(&Method::GET)
                .with_uri(original_uri.path())
        })
}

fn page_response<T, U, F>(
    page: Page<T>,
    base_url: Arc<BaseUrl>,
    to_response: F,
) -> Json<hateoas::Response<VecResponse<U>>>
where
    F: Fn(T, Arc<BaseUrl>) -> U,
{
    let total_pages = page.total_pages();
    let page = page.map(|item| to_response(item, base_url.clone()));
    VecResponse::paginated(
        page.content,
        page.page,
        total_pages,
        page.total_elements,
        page.size,
    )
    .hateoas()
    .json()
}

fn access_point_hateoas(
    point: AccessPoint,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<AccessPoint> {
    let id = point.id;
    let coordinates = point.coordinates();
    hateoas::Response::builder(point, base_url)
        .link("self", resource!("/{}", id))
        .link_option(
            "nearby",
            coordinates.map(|(latitude, longitude)| {
                resource!(
                    "/proximity?latitude={}&longitude={}&distance=1",
                    latitude,
                    longitude
                )
            }),
        )
        .build()
}

fn access_point_with_distance_hateoas(
    point: WithDistance<AccessPoint>,
    base_url: Arc<BaseUrl>,
) -> hateoas::Response<WithDistance<AccessPoint>> {
    let id = point.content.id;
    hateoas::Response::builder(point, base_url)
        .link("self", resource!("/{}", id))
        .build()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use model::{page::PageRequest, ExampleData};

    use super::*;

    fn base_url() -> Arc<BaseUrl> {
        Arc::new(BaseUrl::from_headers(&HeaderMap::new()))
    }

    #[test]
    fn access_point_responses_link_to_themselves_and_nearby() {
        let response = access_point_hateoas(AccessPoint::example_data(), base_url());

        assert_eq!(response.links[0].relation, "self");
        assert_eq!(
            response.links[0].hypertext_reference,
            "http://localhost/api/v1/access-points/1"
        );
        assert_eq!(response.links[1].relation, "nearby");
        assert!(response.links[1].hypertext_reference.starts_with(
            "http://localhost/api/v1/access-points/proximity\
             ?latitude=19.4326077&longitude=-99.133208"
        ));
    }

    #[test]
    fn access_points_without_coordinates_get_no_nearby_link() {
        let mut point = AccessPoint::example_data();
        point.latitude = None;

        let response = access_point_hateoas(point, base_url());

        assert_eq!(response.links.len(), 1);
        assert_eq!(response.links[0].relation, "self");
    }

    #[test]
    fn page_responses_carry_pagination_metadata() {
        let request = PageRequest::new(1, 2, Vec::new());
        let page = Page::new(vec![AccessPoint::example_data()], &request, 5);

        let Json(response) = page_response(page, base_url(), access_point_hateoas);

        let pagination = response.content.pagination.as_ref().unwrap();
        assert_eq!(pagination.current_page, 1);
        assert_eq!(pagination.total_pages, 3);
        assert_eq!(pagination.total_items, 5);
        assert_eq!(pagination.page_size, 2);
        assert_eq!(response.content.data.len(), 1);
    }

    #[test]
    fn with_distance_responses_flatten_the_record() {
        let nearby = WithDistance::new(0.25, AccessPoint::example_data());
        let response = access_point_with_distance_hateoas(nearby, base_url());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["distanceKm"], 0.25);
        assert_eq!(json["govId"], "MX_DF_CDMX_1");
        assert_eq!(json["links"][0]["rel"], "self");
        assert_eq!(
            json["links"][0]["href"],
            "http://localhost/api/v1/access-points/1"
        );
    }
}
