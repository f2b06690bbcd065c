//! Planet items owned by provider users.

use pagination::null_as_empty;
use serde::{Deserialize, Serialize};

/// One generated planet belonging to a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanetItem {
    /// Provider-assigned identifier; opaque to the gateway.
    pub id: String,
    pub name: String,
    pub user_id: u64,
    pub image_url: String,
    /// Calendar day the planet belongs to, as formatted by the provider.
    pub date_key: String,
    pub planet_no: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}
