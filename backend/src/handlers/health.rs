//! Service health for load balancers and the admin UI

use std::time::Duration;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::AppState;

const DATABASE_PING_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseHealth {
    Reachable,
    Unreachable,
}

/// Service identity plus price store reachability; 503 while the store is down
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = ping_database(&state).await;
    let status = match database {
        DatabaseHealth::Reachable => StatusCode::OK,
        DatabaseHealth::Unreachable => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status,
        Json(ServiceHealth {
            service: "price-tracker",
            version: env!("CARGO_PKG_VERSION"),
            environment: state.config.environment.clone(),
            database,
        }),
    )
}

async fn ping_database(state: &AppState) -> DatabaseHealth {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&state.db);

    match tokio::time::timeout(DATABASE_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => DatabaseHealth::Reachable,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            DatabaseHealth::Unreachable
        }
        Err(_) => {
            tracing::warn!(timeout = ?DATABASE_PING_TIMEOUT, "Health check database ping timed out");
            DatabaseHealth::Unreachable
        }
    }
}
