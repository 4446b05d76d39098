use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PublisherState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "horas")]
    pub hours: u32,
    #[serde(rename = "participo")]
    pub participated: bool,
    #[serde(rename = "estudios")]
    pub studies: u32,
    #[serde(rename = "comentario")]
    pub comment: String,
}

/// Monthly report for one group, as served by `/api/reporte`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "reporte")]
    pub rows: BTreeMap<PublisherState, Vec<ReportRow>>,
    /// Participation count for the base status, hour sum for the others.
    #[serde(rename = "totales")]
    pub totals: BTreeMap<PublisherState, u32>,
    #[serde(rename = "totales_estudios")]
    pub study_totals: BTreeMap<PublisherState, u32>,
    #[serde(rename = "total_general")]
    pub total_hours: u32,
    #[serde(rename = "total_estudios_general")]
    pub total_studies: u32,
    #[serde(rename = "mes")]
    pub month_name: String,
    pub year: i32,
    #[serde(rename = "grupo")]
    pub group_id: u32,
}
