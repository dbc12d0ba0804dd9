//! Health check endpoint for monitoring the application's availability.

use rocket::{Route, serde::json::Json};
use serde::Serialize;
use ts_rs::TS;

use crate::envelope::Envelope;

#[derive(Serialize, TS)]
#[ts(export)]
pub struct HealthStatus {
    status: &'static str,
    version: &'static str,
}

/// Health Status endpoint.
///
/// - **URL:** `/api/1/status`
/// - **Method:** `GET`
/// - **Purpose:** Returns the health status of the application
/// - **Authentication:** None required
#[get("/1/status")]
pub fn health_status() -> Json<Envelope<HealthStatus>> {
    Json(Envelope::ok(HealthStatus {
        status: "running",
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub fn routes() -> Vec<Route> {
    routes![health_status]
}
