pub mod group;
pub mod month;
pub mod publisher;
pub mod report;

pub use group::Group;
pub use month::{MONTH_NAMES, month_name};
pub use publisher::{MonthlyRecord, Publisher, PublisherState};
pub use report::{ReportData, ReportRow};
