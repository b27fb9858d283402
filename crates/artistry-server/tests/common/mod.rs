// Shared test utilities for integration tests
use artistry_db::AppState;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-testing-only";

/// Create a test AppState backed by a disconnected database. Good enough
/// for routing and auth-layer tests that never reach a query.
pub fn test_app_state() -> Arc<AppState> {
    Arc::new(AppState {
        db: sea_orm::DatabaseConnection::Disconnected,
        jwt_secret: TEST_JWT_SECRET.to_string(),
    })
}
