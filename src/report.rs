use std::collections::BTreeMap;

use crate::models::{MonthlyRecord, Publisher, PublisherState, ReportData, ReportRow, month_name};

/// Builds the monthly report of one group from cached publishers.
///
/// Rows are grouped by status in status order. The base status totals count
/// participants; the other statuses total hours and studies. The grand total
/// of hours leaves the base status out.
pub fn summarize(publishers: &[Publisher], group_id: u32, month: u32, year: i32) -> ReportData {
    let mut rows: BTreeMap<PublisherState, Vec<ReportRow>> = PublisherState::ALL
        .iter()
        .map(|state| (*state, Vec::new()))
        .collect();

    for publisher in publishers.iter().filter(|p| p.group_or_zero() == group_id) {
        let record = publisher
            .record_for(month, year)
            .cloned()
            .unwrap_or_else(|| MonthlyRecord::blank(month, year));

        rows.entry(publisher.state).or_default().push(ReportRow {
            name: publisher.display_name().to_string(),
            hours: record.hours,
            participated: record.participated.unwrap_or(false),
            studies: record.studies,
            comment: record.comment,
        });
    }

    let mut totals: BTreeMap<PublisherState, u32> = BTreeMap::new();
    let mut study_totals: BTreeMap<PublisherState, u32> = BTreeMap::new();
    for (state, state_rows) in &rows {
        if state.is_base() {
            let participants = state_rows.iter().filter(|row| row.participated).count() as u32;
            totals.insert(*state, participants);
        } else {
            totals.insert(*state, state_rows.iter().map(|row| row.hours).sum());
            study_totals.insert(*state, state_rows.iter().map(|row| row.studies).sum());
        }
    }

    let total_hours: u32 = totals
        .iter()
        .filter(|(state, _)| !state.is_base())
        .map(|(_, hours)| *hours)
        .sum();
    let total_studies: u32 = study_totals.values().sum();

    ReportData {
        rows,
        totals,
        study_totals,
        total_hours,
        total_studies,
        month_name: month_name(month).unwrap_or_default().to_string(),
        year,
        group_id,
    }
}
