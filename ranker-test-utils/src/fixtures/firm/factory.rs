//! Factory functions for generating mock firm database models.
//!
//! Provides pure functions for creating firm models with standard test values. These are
//! in-memory model instances that don't require database interaction, suitable for unit tests.

use chrono::Utc;

use crate::constant::{TEST_DEFAULT_ELO, TEST_STAGE};

/// Create a mock firm database model for testing.
///
/// # Arguments
/// - `id` - Record ID to assign
/// - `name` - Firm name, also used to derive the website
///
/// # Returns
/// - `entity::firm::Model` - A firm model in the default test category with the default rating
pub fn mock_firm_model(id: i32, name: &str) -> entity::firm::Model {
    entity::firm::Model {
        id,
        name: name.to_string(),
        website: website_for(name),
        stage: TEST_STAGE.to_string(),
        logo_url: None,
        elo_score: TEST_DEFAULT_ELO,
        match_count: 0,
        created_at: Utc::now().naive_utc(),
    }
}

/// Website assigned to fixture firms, e.g. `Goldman Sachs` -> `https://www.goldmansachs.com`
pub fn website_for(name: &str) -> String {
    let host: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    format!("https://www.{}.com", host)
}
