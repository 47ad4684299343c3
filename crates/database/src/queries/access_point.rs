use model::{
    access_point::AccessPoint,
    page::{PageRequest, SortDirection, SortField, SortOrder},
    WithDistance,
};
use sqlx::{Executor, Postgres};
use utility::{geo::EARTH_RADIUS_KM, let_also::LetAlso};
use wifi_points::database::Result;

use crate::data_model::access_point::{AccessPointRow, NearbyAccessPointRow};

use super::convert_error;

// lookups

pub async fn get<'c, E>(executor: E, id: i64) -> Result<AccessPoint>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, gov_id, program, install_date,
            latitude, longitude, neighborhood, borough
        FROM
            access_points
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|row: AccessPointRow| row.into())
}

pub async fn get_page<'c, E>(
    executor: E,
    request: &PageRequest,
) -> Result<Vec<AccessPoint>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!(
        "
        SELECT
            id, gov_id, program, install_date,
            latitude, longitude, neighborhood, borough
        FROM
            access_points
        {}
        LIMIT $1 OFFSET $2;
        ",
        order_by_clause(&request.sort)
    );
    sqlx::query_as(&query)
        .bind(bigint(request.size))
        .bind(bigint(request.offset()))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows: Vec<AccessPointRow>| {
            Ok(rows.into_iter().map(AccessPoint::from).collect())
        })
}

pub async fn count_all<'c, E>(executor: E) -> Result<usize>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM access_points;")
        .fetch_one(executor)
        .await
        .map_err(convert_error)
        .map(|count: i64| count as usize)
}

pub async fn get_by_neighborhood<'c, E>(
    executor: E,
    neighborhood: &str,
    request: &PageRequest,
) -> Result<Vec<AccessPoint>>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = format!(
        "
        SELECT
            id, gov_id, program, install_date,
            latitude, longitude, neighborhood, borough
        FROM
            access_points
        WHERE neighborhood = $1
        {}
        LIMIT $2 OFFSET $3;
        ",
        order_by_clause(&request.sort)
    );
    sqlx::query_as(&query)
        .bind(neighborhood)
        .bind(bigint(request.size))
        .bind(bigint(request.offset()))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows: Vec<AccessPointRow>| {
            Ok(rows.into_iter().map(AccessPoint::from).collect())
        })
}

pub async fn count_by_neighborhood<'c, E>(
    executor: E,
    neighborhood: &str,
) -> Result<usize>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        SELECT COUNT(*) FROM access_points WHERE neighborhood = $1;
        ",
    )
    .bind(neighborhood)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|count: i64| count as usize)
}

// proximity

/// Records strictly closer than `radius_km` to the center, nearest first.
/// The ACOS argument is clamped to [-1, 1]: rounding can push it past 1 for
/// coincident coordinates, which Postgres rejects as out of domain.
pub async fn get_nearby<'c, E>(
    executor: E,
    center_latitude: f64,
    center_longitude: f64,
    radius_km: f64,
    request: &PageRequest,
) -> Result<Vec<WithDistance<AccessPoint>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        WITH distance_calc AS (
            SELECT
                id, gov_id, program, install_date,
                latitude, longitude, neighborhood, borough,
                ($1 * ACOS(LEAST(1.0, GREATEST(-1.0,
                    COS(RADIANS($2)) * COS(RADIANS(latitude)) *
                    COS(RADIANS(longitude) - RADIANS($3)) +
                    SIN(RADIANS($2)) * SIN(RADIANS(latitude))
                )))) AS distance_km
            FROM
                access_points
            WHERE
                latitude IS NOT NULL
                AND longitude IS NOT NULL
        )
        SELECT
            id, gov_id, program, install_date,
            latitude, longitude, neighborhood, borough,
            distance_km
        FROM
            distance_calc
        WHERE
            distance_km < $4
        ORDER BY
            distance_km ASC, id ASC
        LIMIT $5 OFFSET $6;
        ",
    )
    .bind(EARTH_RADIUS_KM)
    .bind(center_latitude)
    .bind(center_longitude)
    .bind(radius_km)
    .bind(bigint(request.size))
    .bind(bigint(request.offset()))
    .fetch_all(executor)
    .await
    .map_err(convert_error)?
    .let_owned(|rows: Vec<NearbyAccessPointRow>| {
        Ok(rows.into_iter().map(WithDistance::from).collect())
    })
}

pub async fn count_nearby<'c, E>(
    executor: E,
    center_latitude: f64,
    center_longitude: f64,
    radius_km: f64,
) -> Result<usize>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar(
        "
        WITH distance_calc AS (
            SELECT
                ($1 * ACOS(LEAST(1.0, GREATEST(-1.0,
                    COS(RADIANS($2)) * COS(RADIANS(latitude)) *
                    COS(RADIANS(longitude) - RADIANS($3)) +
                    SIN(RADIANS($2)) * SIN(RADIANS(latitude))
                )))) AS distance_km
            FROM
                access_points
            WHERE
                latitude IS NOT NULL
                AND longitude IS NOT NULL
        )
        SELECT COUNT(*) FROM distance_calc WHERE distance_km < $4;
        ",
    )
    .bind(EARTH_RADIUS_KM)
    .bind(center_latitude)
    .bind(center_longitude)
    .bind(radius_km)
    .fetch_one(executor)
    .await
    .map_err(convert_error)
    .map(|count: i64| count as usize)
}

// paging

/// LIMIT and OFFSET bind as BIGINT; values past `i64::MAX` clamp to it.
fn bigint(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

// sorting

fn column(field: SortField) -> &'static str {
    match field {
        SortField::Id => "id",
        SortField::GovId => "gov_id",
        SortField::Program => "program",
        SortField::InstallDate => "install_date",
        SortField::Latitude => "latitude",
        SortField::Longitude => "longitude",
        SortField::Neighborhood => "neighborhood",
        SortField::Borough => "borough",
    }
}

fn direction(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    }
}

/// Renders the ORDER BY clause for a page request. Column names come from the
/// closed [`SortField`] set, never from raw request input. A trailing
/// `id ASC` keeps page boundaries stable when the requested ordering ties.
fn order_by_clause(sort: &[SortOrder]) -> String {
    let mut terms = sort
        .iter()
        .map(|order| {
            format!("{} {}", column(order.field), direction(order.direction))
        })
        .collect::<Vec<_>>();
    if !sort.iter().any(|order| order.field == SortField::Id) {
        terms.push("id ASC".to_owned());
    }
    format!("ORDER BY {}", terms.join(", "))
}

#[cfg(test)]
mod tests {
    use model::page::{SortDirection, SortField, SortOrder};

    use super::{bigint, order_by_clause};

    #[test]
    fn default_ordering_is_by_id() {
        assert_eq!(order_by_clause(&[]), "ORDER BY id ASC");
    }

    #[test]
    fn requested_ordering_keeps_the_id_tiebreaker() {
        let sort = vec![SortOrder {
            field: SortField::Borough,
            direction: SortDirection::Descending,
        }];

        assert_eq!(order_by_clause(&sort), "ORDER BY borough DESC, id ASC");
    }

    #[test]
    fn explicit_id_ordering_is_not_duplicated() {
        let sort = vec![SortOrder {
            field: SortField::Id,
            direction: SortDirection::Descending,
        }];

        assert_eq!(order_by_clause(&sort), "ORDER BY id DESC");
    }

    #[test]
    fn sort_orders_are_joined_in_request_order() {
        let sort = vec![
            SortOrder {
                field: SortField::Neighborhood,
                direction: SortDirection::Ascending,
            },
            SortOrder {
                field: SortField::InstallDate,
                direction: SortDirection::Descending,
            },
        ];

        assert_eq!(
            order_by_clause(&sort),
            "ORDER BY neighborhood ASC, install_date DESC, id ASC"
        );
    }

    #[test]
    fn limit_and_offset_values_clamp_to_the_bigint_range() {
        assert_eq!(bigint(25), 25);
        assert_eq!(bigint(usize::MAX), i64::MAX);
    }
}
