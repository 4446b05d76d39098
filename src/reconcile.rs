use crate::api::AdminUpdateRequest;
use crate::models::{MonthlyRecord, Publisher, PublisherState};

/// What a local patch did to the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    Replaced,
    Appended,
    /// The person is not in the cached list; nothing changed.
    Missing,
}

/// Applies a confirmed monthly save to the cached list.
///
/// The record for the same `(month, year)` is replaced in place, otherwise the
/// record is appended. The person's status is updated to the submitted one.
pub fn apply_saved_month(
    publishers: &mut [Publisher],
    id: &str,
    state: PublisherState,
    record: MonthlyRecord,
) -> Reconciled {
    let Some(publisher) = publishers.iter_mut().find(|p| p.id == id) else {
        return Reconciled::Missing;
    };

    publisher.state = state;
    if publisher.upsert_record(record) {
        Reconciled::Replaced
    } else {
        Reconciled::Appended
    }
}

/// Applies a confirmed admin save (name, group, status) to the cached list.
pub fn apply_admin_update(publishers: &mut [Publisher], id: &str, update: &AdminUpdateRequest) -> bool {
    match publishers.iter_mut().find(|p| p.id == id) {
        Some(publisher) => {
            publisher.name = update.name.clone();
            publisher.group_id = Some(update.group_id);
            publisher.state = update.state;
            true
        }
        None => false,
    }
}

/// Admin listing order: group id ascending, missing groups first. Stable.
pub fn sort_by_group(publishers: &mut [Publisher]) {
    publishers.sort_by_key(Publisher::group_or_zero);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(month: u32, year: i32, studies: u32) -> MonthlyRecord {
        MonthlyRecord {
            month,
            year,
            participated: Some(true),
            studies,
            comment: String::new(),
            hours: 0,
        }
    }

    fn person(id: &str, group_id: Option<u32>, hours: Vec<MonthlyRecord>) -> Publisher {
        Publisher {
            id: id.to_string(),
            name: id.to_uppercase(),
            group_id,
            state: PublisherState::Publisher,
            hours,
        }
    }

    #[test]
    fn existing_month_is_replaced_in_place() {
        let mut list = vec![person("p1", Some(1), vec![record(5, 2024, 0)])];

        let outcome = apply_saved_month(&mut list, "p1", PublisherState::Publisher, record(5, 2024, 3));

        assert_eq!(outcome, Reconciled::Replaced);
        assert_eq!(list[0].hours.len(), 1);
        assert_eq!(list[0].hours[0].studies, 3);
    }

    #[test]
    fn new_month_is_appended() {
        let mut list = vec![person("p1", Some(1), vec![record(5, 2024, 0), record(6, 2024, 1)])];

        let outcome = apply_saved_month(&mut list, "p1", PublisherState::RegularPioneer, record(5, 2023, 2));

        assert_eq!(outcome, Reconciled::Appended);
        assert_eq!(list[0].hours.len(), 3);
        assert_eq!(list[0].hours[2], record(5, 2023, 2));
        assert_eq!(list[0].state, PublisherState::RegularPioneer);
    }

    #[test]
    fn unknown_person_leaves_cache_untouched() {
        let mut list = vec![person("p1", Some(1), vec![])];
        let before = list.clone();

        let outcome = apply_saved_month(&mut list, "nope", PublisherState::Publisher, record(1, 2024, 0));

        assert_eq!(outcome, Reconciled::Missing);
        assert_eq!(list, before);
    }

    #[test]
    fn admin_update_patches_identity_fields() {
        let mut list = vec![person("p1", None, vec![record(1, 2024, 0)])];
        let update = AdminUpdateRequest {
            name: "Nuevo".to_string(),
            group_id: 3,
            state: PublisherState::AuxiliaryPioneer,
        };

        assert!(apply_admin_update(&mut list, "p1", &update));
        assert_eq!(list[0].name, "Nuevo");
        assert_eq!(list[0].group_id, Some(3));
        assert_eq!(list[0].hours.len(), 1);
        assert!(!apply_admin_update(&mut list, "p2", &update));
    }

    #[test]
    fn sorts_by_group_with_missing_as_zero() {
        let mut list = vec![
            person("c", Some(3), vec![]),
            person("a", Some(1), vec![]),
            person("none", None, vec![]),
            person("b", Some(1), vec![]),
        ];
        sort_by_group(&mut list);

        let ids: Vec<_> = list.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["none", "a", "b", "c"]);
    }
}
