use model::{
    access_point::AccessPoint,
    page::{Page, PageRequest, SortOrder},
    WithDistance,
};

use crate::{
    database::{AccessPointRepo, DatabaseError},
    RequestError, RequestResult,
};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_RADIUS_KM: f64 = 1.0;
pub const MIN_RADIUS_KM: f64 = 1.0;
pub const COLONIA_MIN_CHARS: usize = 2;
pub const COLONIA_MAX_CHARS: usize = 100;

/// Validates request parameters and delegates lookups to the repo. All range
/// checks happen here, so repo implementations can trust their inputs.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: AccessPointRepo,
{
    database: D,
}

impl<D> Client<D>
where
    D: AccessPointRepo,
{
    pub fn new(database: D) -> Self {
        Self { database }
    }

    pub async fn find_all(
        &self,
        page: Option<usize>,
        size: Option<usize>,
        sort: &[String],
    ) -> RequestResult<Page<AccessPoint>> {
        let request = page_request(page, size, sort)?;
        Ok(self.database.get_page(&request).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> RequestResult<AccessPoint> {
        self.database.get(id).await.map_err(|why| match why {
            DatabaseError::NotFound => RequestError::NotFound {
                resource: "AccessPoint",
                field: "id",
                value: id.to_string(),
            },
            other => RequestError::Database(other),
        })
    }

    /// Looks up records by exact neighborhood name. An unknown name is not an
    /// error, it yields an empty page.
    pub async fn find_by_colonia(
        &self,
        colonia: &str,
        page: Option<usize>,
        size: Option<usize>,
        sort: &[String],
    ) -> RequestResult<Page<AccessPoint>> {
        if colonia.trim().is_empty() {
            return Err(RequestError::validation("colonia", "must not be blank"));
        }
        let length = colonia.chars().count();
        if !(COLONIA_MIN_CHARS..=COLONIA_MAX_CHARS).contains(&length) {
            return Err(RequestError::validation(
                "colonia",
                format!(
                    "must be between {} and {} characters",
                    COLONIA_MIN_CHARS, COLONIA_MAX_CHARS
                ),
            ));
        }
        let request = page_request(page, size, sort)?;
        Ok(self
            .database
            .get_by_neighborhood(colonia, &request)
            .await?)
    }

    /// Records strictly closer than `distance_km` (default 1 km) to the given
    /// coordinates. Results always come back nearest first, sort parameters
    /// do not apply here.
    pub async fn find_by_proximity(
        &self,
        latitude: f64,
        longitude: f64,
        distance_km: Option<f64>,
        page: Option<usize>,
        size: Option<usize>,
    ) -> RequestResult<Page<WithDistance<AccessPoint>>> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(RequestError::validation(
                "latitude",
                "must be between -90 and 90",
            ));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(RequestError::validation(
                "longitude",
                "must be between -180 and 180",
            ));
        }
        let radius_km = distance_km.unwrap_or(DEFAULT_RADIUS_KM);
        if radius_km.is_nan() || radius_km < MIN_RADIUS_KM {
            return Err(RequestError::validation(
                "distance",
                format!("must be at least {} km", MIN_RADIUS_KM),
            ));
        }
        let request = page_request(page, size, &[])?;
        Ok(self
            .database
            .get_nearby(latitude, longitude, radius_km, &request)
            .await?)
    }
}

fn page_request(
    page: Option<usize>,
    size: Option<usize>,
    sort: &[String],
) -> RequestResult<PageRequest> {
    let size = size.unwrap_or(DEFAULT_PAGE_SIZE);
    if size == 0 {
        return Err(RequestError::validation("size", "must be at least 1"));
    }
    let sort = sort
        .iter()
        .map(|raw| {
            SortOrder::parse(raw).ok_or_else(|| {
                RequestError::validation(
                    "sort",
                    format!("unknown sort expression '{}'", raw),
                )
            })
        })
        .collect::<RequestResult<Vec<_>>>()?;
    Ok(PageRequest::new(page.unwrap_or(0), size, sort))
}
