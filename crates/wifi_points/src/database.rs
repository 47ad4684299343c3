use std::{error, result};

use async_trait::async_trait;
use model::{
    access_point::AccessPoint,
    page::{Page, PageRequest},
    WithDistance,
};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Read access to the stored access point records.
/// Multiple concurrent accesses should be possible by e.g. cloning the
/// implementing object.
#[async_trait]
pub trait AccessPointRepo: Clone + Send + Sync + 'static {
    async fn get(&self, id: i64) -> Result<AccessPoint>;

    async fn get_page(&self, request: &PageRequest) -> Result<Page<AccessPoint>>;

    /// Records whose neighborhood matches `neighborhood` exactly.
    async fn get_by_neighborhood(
        &self,
        neighborhood: &str,
        request: &PageRequest,
    ) -> Result<Page<AccessPoint>>;

    /// Records strictly closer than `radius_km` to the given coordinates,
    /// ordered nearest first. Records without coordinates never appear.
    async fn get_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        request: &PageRequest,
    ) -> Result<Page<WithDistance<AccessPoint>>>;
}
