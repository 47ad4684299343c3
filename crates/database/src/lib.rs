use std::{env, error::Error, path::Path};

use async_trait::async_trait;
use model::{
    access_point::AccessPoint,
    page::{Page, PageRequest},
    WithDistance,
};
use wifi_points::database::AccessPointRepo;

pub mod csv_script;
pub mod data_model;
pub mod queries;
pub mod seed;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
        })
    }

    pub(self) fn postgres_url(self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

#[derive(Clone)]
pub struct PgDatabase {
    connection: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { connection: pool })
    }

    /// Loads the seed script unless the table already holds data. See
    /// [`seed::run_script`].
    pub async fn run_seed_script(&self, path: &Path) -> Result<(), Box<dyn Error>> {
        seed::run_script(&self.connection, path).await
    }
}

#[async_trait]
impl AccessPointRepo for PgDatabase {
    async fn get(&self, id: i64) -> wifi_points::database::Result<AccessPoint> {
        queries::access_point::get(&self.connection, id).await
    }

    async fn get_page(
        &self,
        request: &PageRequest,
    ) -> wifi_points::database::Result<Page<AccessPoint>> {
        let content =
            queries::access_point::get_page(&self.connection, request).await?;
        let total = queries::access_point::count_all(&self.connection).await?;
        Ok(Page::new(content, request, total))
    }

    async fn get_by_neighborhood(
        &self,
        neighborhood: &str,
        request: &PageRequest,
    ) -> wifi_points::database::Result<Page<AccessPoint>> {
        let content = queries::access_point::get_by_neighborhood(
            &self.connection,
            neighborhood,
            request,
        )
        .await?;
        let total = queries::access_point::count_by_neighborhood(
            &self.connection,
            neighborhood,
        )
        .await?;
        Ok(Page::new(content, request, total))
    }

    async fn get_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        request: &PageRequest,
    ) -> wifi_points::database::Result<Page<WithDistance<AccessPoint>>> {
        let content = queries::access_point::get_nearby(
            &self.connection,
            latitude,
            longitude,
            radius_km,
            request,
        )
        .await?;
        let total = queries::access_point::count_nearby(
            &self.connection,
            latitude,
            longitude,
            radius_km,
        )
        .await?;
        Ok(Page::new(content, request, total))
    }
}
