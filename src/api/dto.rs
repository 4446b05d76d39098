use serde::{Deserialize, Serialize};

use crate::models::{MonthlyRecord, PublisherState};

/// `{success: bool}` envelope returned by every mutating endpoint.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `PUT /api/persona/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveMonthRequest {
    pub hours: MonthlyRecord,
    pub state: PublisherState,
}

/// Body of `PUT /api/persona/admin/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUpdateRequest {
    pub name: String,
    #[serde(rename = "groupID")]
    pub group_id: u32,
    pub state: PublisherState,
}

/// Body of `POST /api/publishers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPublisherRequest {
    pub name: String,
    #[serde(rename = "groupID")]
    pub group_id: u32,
    pub state: PublisherState,
    pub hours: Vec<MonthlyRecord>,
}
