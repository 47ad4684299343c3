use model::{access_point::AccessPoint, WithDistance};
use sqlx::prelude::FromRow;

/// A public WiFi access point. E.g., a street kiosk or a park antenna.
/// Table: access_points
#[derive(Debug, Clone, FromRow)]
pub struct AccessPointRow {
    pub id: i64,
    pub gov_id: Option<String>,
    pub program: Option<String>,
    pub install_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood: Option<String>,
    pub borough: Option<String>,
}

impl From<AccessPointRow> for AccessPoint {
    fn from(row: AccessPointRow) -> Self {
        AccessPoint {
            id: row.id,
            gov_id: row.gov_id,
            program: row.program,
            install_date: row.install_date,
            latitude: row.latitude,
            longitude: row.longitude,
            neighborhood: row.neighborhood,
            borough: row.borough,
        }
    }
}

/// An access point as produced by the proximity query, which selects the
/// computed `distance_km` column alongside the record.
#[derive(Debug, Clone, FromRow)]
pub struct NearbyAccessPointRow {
    pub id: i64,
    pub gov_id: Option<String>,
    pub program: Option<String>,
    pub install_date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub neighborhood: Option<String>,
    pub borough: Option<String>,
    pub distance_km: f64,
}

impl From<NearbyAccessPointRow> for WithDistance<AccessPoint> {
    fn from(row: NearbyAccessPointRow) -> Self {
        WithDistance::new(
            row.distance_km,
            AccessPoint {
                id: row.id,
                gov_id: row.gov_id,
                program: row.program,
                install_date: row.install_date,
                latitude: row.latitude,
                longitude: row.longitude,
                neighborhood: row.neighborhood,
                borough: row.borough,
            },
        )
    }
}
