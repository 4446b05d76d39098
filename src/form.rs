//! Per-card edit state.
//!
//! Each card on screen owns one of these structs, keyed by publisher id in the
//! session. Inputs are kept as the raw text the operator typed and only turned
//! into numbers when a request body is built.

use crate::api::{AdminUpdateRequest, NewPublisherRequest};
use crate::error::ClientError;
use crate::models::{MonthlyRecord, Publisher, PublisherState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Hours,
    Participated,
    Studies,
    Comment,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Hours => "hours",
            Field::Participated => "participated",
            Field::Studies => "studies",
            Field::Comment => "comment",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "hours" | "horas" => Some(Field::Hours),
            "participated" | "participo" => Some(Field::Participated),
            "studies" | "estudios" => Some(Field::Studies),
            "comment" | "comentario" => Some(Field::Comment),
            _ => None,
        }
    }
}

const BASE_FIELDS: [Field; 3] = [Field::Participated, Field::Studies, Field::Comment];
const HOUR_FIELDS: [Field; 4] = [Field::Hours, Field::Participated, Field::Studies, Field::Comment];

/// Inputs shown for a status. The base status never shows hours.
pub fn visible_fields(state: PublisherState) -> &'static [Field] {
    if state.is_base() {
        &BASE_FIELDS
    } else {
        &HOUR_FIELDS
    }
}

/// Numeric input semantics: anything that is not a non-negative integer counts as 0.
pub fn parse_count(input: &str) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0)
}

fn parse_flag(input: &str) -> Result<bool, ClientError> {
    match input.trim().to_lowercase().as_str() {
        "true" | "si" | "sí" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        other => Err(ClientError::Validation(format!("not a yes/no value: {}", other))),
    }
}

/// Monthly edit state of one person card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonForm {
    pub state: PublisherState,
    pub hours: String,
    pub participated: bool,
    pub studies: String,
    pub comment: String,
}

impl PersonForm {
    /// Seeds the inputs from the cached record of `(month, year)`.
    pub fn for_publisher(publisher: &Publisher, month: u32, year: i32) -> Self {
        let record = publisher
            .record_for(month, year)
            .cloned()
            .unwrap_or_else(|| MonthlyRecord::blank(month, year));

        Self {
            state: publisher.state,
            hours: record.hours.to_string(),
            participated: record.participated.unwrap_or(true),
            studies: record.studies.to_string(),
            comment: record.comment,
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        visible_fields(self.state)
    }

    /// Writes one input. Hidden fields cannot be edited.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), ClientError> {
        if !self.fields().contains(&field) {
            return Err(ClientError::Validation(format!(
                "{} is not shown for {}",
                field.key(),
                self.state
            )));
        }
        match field {
            Field::Hours => self.hours = value.to_string(),
            Field::Participated => self.participated = parse_flag(value)?,
            Field::Studies => self.studies = value.to_string(),
            Field::Comment => self.comment = value.to_string(),
        }
        Ok(())
    }

    /// Record submitted on save. Hours are 0 for the base status whatever the input says.
    pub fn to_record(&self, month: u32, year: i32) -> MonthlyRecord {
        let hours = if self.state.is_base() {
            0
        } else {
            parse_count(&self.hours)
        };

        MonthlyRecord {
            month,
            year,
            participated: Some(self.participated),
            studies: parse_count(&self.studies),
            comment: self.comment.trim().to_string(),
            hours,
        }
    }
}

/// Name, group and status edit state of an admin card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminForm {
    pub name: String,
    pub group_id: u32,
    pub state: PublisherState,
}

impl AdminForm {
    pub fn for_publisher(publisher: &Publisher) -> Self {
        Self {
            name: publisher.name.clone(),
            group_id: publisher.group_id.unwrap_or(1),
            state: publisher.state,
        }
    }

    pub fn to_request(&self) -> Result<AdminUpdateRequest, ClientError> {
        Ok(AdminUpdateRequest {
            name: required_name(&self.name)?,
            group_id: self.group_id,
            state: self.state,
        })
    }
}

/// Contents of the "new publisher" modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPublisherDraft {
    pub name: String,
    pub group_id: u32,
    pub state: PublisherState,
}

impl Default for NewPublisherDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            group_id: 1,
            state: PublisherState::Publisher,
        }
    }
}

impl NewPublisherDraft {
    pub fn to_request(&self) -> Result<NewPublisherRequest, ClientError> {
        Ok(NewPublisherRequest {
            name: required_name(&self.name)?,
            group_id: self.group_id,
            state: self.state,
            hours: Vec::new(),
        })
    }
}

fn required_name(name: &str) -> Result<String, ClientError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation("name is required".to_string()));
    }
    Ok(name.to_string())
}

/// Parses a group selector value, limited to the fixed groups.
pub fn parse_group_id(input: &str) -> Result<u32, ClientError> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|id| crate::models::group::group_ids().any(|g| g == *id))
        .ok_or_else(|| ClientError::Validation(format!("invalid group: {}", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(state: PublisherState, hours: Vec<MonthlyRecord>) -> Publisher {
        Publisher {
            id: "p1".to_string(),
            name: "Ana".to_string(),
            group_id: Some(2),
            state,
            hours,
        }
    }

    fn stored(hours: u32) -> MonthlyRecord {
        MonthlyRecord {
            month: 5,
            year: 2024,
            participated: Some(false),
            studies: 1,
            comment: "nota".to_string(),
            hours,
        }
    }

    #[test]
    fn base_status_hides_hours() {
        assert_eq!(
            visible_fields(PublisherState::Publisher),
            &[Field::Participated, Field::Studies, Field::Comment]
        );
        for state in &PublisherState::ALL[1..] {
            assert_eq!(visible_fields(*state)[0], Field::Hours);
            assert_eq!(visible_fields(*state).len(), 4);
        }
    }

    #[test]
    fn seeds_from_stored_record_or_defaults() {
        let form = PersonForm::for_publisher(&publisher(PublisherState::RegularPioneer, vec![stored(30)]), 5, 2024);
        assert_eq!(form.hours, "30");
        assert!(!form.participated);
        assert_eq!(form.comment, "nota");

        let empty = PersonForm::for_publisher(&publisher(PublisherState::RegularPioneer, vec![stored(30)]), 6, 2024);
        assert_eq!(empty.hours, "0");
        assert!(empty.participated);
        assert_eq!(empty.studies, "0");
    }

    #[test]
    fn stored_record_without_flag_shows_as_participated() {
        let record: MonthlyRecord = serde_json::from_str(r#"{"month":5,"year":2024,"hours":0}"#).unwrap();
        let form = PersonForm::for_publisher(&publisher(PublisherState::Publisher, vec![record]), 5, 2024);
        assert!(form.participated);
        assert_eq!(form.to_record(5, 2024).participated, Some(true));
    }

    #[test]
    fn base_status_always_submits_zero_hours() {
        let mut form = PersonForm::for_publisher(&publisher(PublisherState::Publisher, vec![stored(25)]), 5, 2024);
        assert_eq!(form.hours, "25");
        form.set(Field::Studies, "3").unwrap();

        let record = form.to_record(5, 2024);
        assert_eq!(record.hours, 0);
        assert_eq!(record.studies, 3);
    }

    #[test]
    fn hidden_field_cannot_be_edited() {
        let mut form = PersonForm::for_publisher(&publisher(PublisherState::Publisher, vec![]), 5, 2024);
        let err = form.set(Field::Hours, "10").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn bad_numbers_submit_as_zero_and_comment_is_trimmed() {
        let mut form = PersonForm::for_publisher(&publisher(PublisherState::AuxiliaryPioneer, vec![]), 1, 2025);
        form.set(Field::Hours, "abc").unwrap();
        form.set(Field::Studies, "-2").unwrap();
        form.set(Field::Comment, "  hola  ").unwrap();
        form.set(Field::Participated, "no").unwrap();

        let record = form.to_record(1, 2025);
        assert_eq!(record.hours, 0);
        assert_eq!(record.studies, 0);
        assert_eq!(record.comment, "hola");
        assert_eq!(record.participated, Some(false));
    }

    #[test]
    fn empty_names_are_rejected() {
        let draft = NewPublisherDraft {
            name: "   ".to_string(),
            ..NewPublisherDraft::default()
        };
        assert!(draft.to_request().unwrap_err().is_validation());

        let admin = AdminForm {
            name: String::new(),
            group_id: 1,
            state: PublisherState::Publisher,
        };
        assert!(admin.to_request().is_err());
    }

    #[test]
    fn new_publisher_request_starts_without_records() {
        let draft = NewPublisherDraft {
            name: " Luis ".to_string(),
            group_id: 4,
            state: PublisherState::RegularPioneer,
        };
        let req = draft.to_request().unwrap();
        assert_eq!(req.name, "Luis");
        assert_eq!(req.group_id, 4);
        assert!(req.hours.is_empty());
    }

    #[test]
    fn group_ids_are_limited() {
        assert_eq!(parse_group_id("6").unwrap(), 6);
        assert!(parse_group_id("7").is_err());
        assert!(parse_group_id("0").is_err());
    }
}
