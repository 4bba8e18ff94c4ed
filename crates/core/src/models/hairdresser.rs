use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A salon. Its access token stays server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hairdresser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: i32,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHairdresserRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: i32,
    pub image_extension: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateHairdresserRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub postal_code: i32,
    pub image_extension: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HairdresserQuery {
    pub name: Option<String>,
}

/// Builds the stored image file name, e.g. `hairdresser_<id>.png`.
///
/// The extension is accepted with or without its leading dot.
pub fn image_name(prefix: &str, id: Uuid, extension: Option<&str>) -> String {
    match extension.map(|ext| ext.trim().trim_start_matches('.')) {
        Some(ext) if !ext.is_empty() => format!("{}_{}.{}", prefix, id, ext),
        _ => String::new(),
    }
}
