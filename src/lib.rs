pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{result_service::ResultService, test_service::TestService};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub test_service: TestService,
    pub result_service: ResultService,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let test_service = TestService::new(pool.clone());
        let result_service = ResultService::new(pool.clone());

        Self {
            pool,
            test_service,
            result_service,
        }
    }
}
