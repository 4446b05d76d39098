use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Service status of a publisher. Declaration order is the order used by reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PublisherState {
    #[default]
    #[serde(rename = "Publicador")]
    Publisher,
    #[serde(rename = "Precursor Auxiliar")]
    AuxiliaryPioneer,
    #[serde(rename = "Precursor Auxiliar Indefinido")]
    IndefiniteAuxiliaryPioneer,
    #[serde(rename = "Precursor Regular")]
    RegularPioneer,
}

impl PublisherState {
    pub const ALL: [PublisherState; 4] = [
        PublisherState::Publisher,
        PublisherState::AuxiliaryPioneer,
        PublisherState::IndefiniteAuxiliaryPioneer,
        PublisherState::RegularPioneer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PublisherState::Publisher => "Publicador",
            PublisherState::AuxiliaryPioneer => "Precursor Auxiliar",
            PublisherState::IndefiniteAuxiliaryPioneer => "Precursor Auxiliar Indefinido",
            PublisherState::RegularPioneer => "Precursor Regular",
        }
    }

    /// Base status: no hour tracking.
    pub fn is_base(&self) -> bool {
        matches!(self, PublisherState::Publisher)
    }

    pub fn tracks_hours(&self) -> bool {
        !self.is_base()
    }
}

impl fmt::Display for PublisherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublisherState {
    type Err = String;

    /// Accepts the full status name (any case) or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        if let Some(state) = Self::ALL
            .iter()
            .find(|state| state.as_str().to_lowercase() == needle)
        {
            return Ok(*state);
        }
        match needle.as_str() {
            "publicador" | "publisher" => Ok(PublisherState::Publisher),
            "auxiliar" | "auxiliary" => Ok(PublisherState::AuxiliaryPioneer),
            "indefinido" | "indefinite" => Ok(PublisherState::IndefiniteAuxiliaryPioneer),
            "regular" => Ok(PublisherState::RegularPioneer),
            _ => Err(format!("unknown publisher state: {}", s.trim())),
        }
    }
}

/// One month's activity entry, keyed by `(month, year)` inside a publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    pub month: u32,
    pub year: i32,
    /// `None` when the stored document has no `Participo` key.
    #[serde(rename = "Participo", default, skip_serializing_if = "Option::is_none")]
    pub participated: Option<bool>,
    #[serde(rename = "estudios", default)]
    pub studies: u32,
    #[serde(rename = "Comentario", default)]
    pub comment: String,
    #[serde(default)]
    pub hours: u32,
}

impl MonthlyRecord {
    /// Values shown for a month that has no stored record yet.
    pub fn blank(month: u32, year: i32) -> Self {
        Self {
            month,
            year,
            participated: None,
            studies: 0,
            comment: String::new(),
            hours: 0,
        }
    }

    pub fn is_for(&self, month: u32, year: i32) -> bool {
        self.month == month && self.year == year
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "groupID", default)]
    pub group_id: Option<u32>,
    #[serde(default)]
    pub state: PublisherState,
    #[serde(default)]
    pub hours: Vec<MonthlyRecord>,
}

impl Publisher {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Sin nombre"
        } else {
            &self.name
        }
    }

    /// Missing group ids sort and compare as 0.
    pub fn group_or_zero(&self) -> u32 {
        self.group_id.unwrap_or(0)
    }

    pub fn record_for(&self, month: u32, year: i32) -> Option<&MonthlyRecord> {
        self.hours.iter().find(|record| record.is_for(month, year))
    }

    /// Replaces the record for the same `(month, year)` or appends it.
    /// Returns `true` when an existing record was replaced.
    pub fn upsert_record(&mut self, record: MonthlyRecord) -> bool {
        match self
            .hours
            .iter_mut()
            .find(|existing| existing.is_for(record.month, record.year))
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.hours.push(record);
                false
            }
        }
    }
}
