#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use publisher_reports::api::{
    AdminUpdateRequest, ExportFile, ExportKind, NewPublisherRequest, ReportsApi, SaveMonthRequest,
};
use publisher_reports::error::ClientError;
use publisher_reports::models::{Group, MonthlyRecord, Publisher, PublisherState, ReportData};
use publisher_reports::report;

/// In-memory backend that records every call it receives.
#[derive(Default)]
pub struct FakeApi {
    pub publishers: Mutex<Vec<Publisher>>,
    pub calls: Mutex<Vec<String>>,
    pub saved: Mutex<Vec<(String, SaveMonthRequest)>>,
    pub created: Mutex<Vec<NewPublisherRequest>>,
    pub fail: AtomicBool,
}

impl FakeApi {
    pub fn with_publishers(publishers: Vec<Publisher>) -> Self {
        Self {
            publishers: Mutex::new(publishers),
            ..Self::default()
        }
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(call);
        if self.fail.load(Ordering::SeqCst) {
            return Err(ClientError::Rejected("forced failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportsApi for FakeApi {
    async fn list_groups(&self) -> Result<Vec<Group>, ClientError> {
        self.record("list_groups".to_string())?;
        Ok((1..=6)
            .map(|id| Group {
                id,
                name: format!("Grupo {}", id),
            })
            .collect())
    }

    async fn list_group_publishers(&self, group_id: u32) -> Result<Vec<Publisher>, ClientError> {
        self.record(format!("list_group_publishers {}", group_id))?;
        Ok(self
            .publishers
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .cloned()
            .collect())
    }

    async fn list_all_publishers(&self) -> Result<Vec<Publisher>, ClientError> {
        self.record("list_all_publishers".to_string())?;
        Ok(self.publishers.lock().unwrap().clone())
    }

    async fn save_month(&self, id: &str, req: &SaveMonthRequest) -> Result<(), ClientError> {
        self.record(format!("save_month {}", id))?;
        self.saved.lock().unwrap().push((id.to_string(), req.clone()));
        Ok(())
    }

    async fn save_admin(&self, id: &str, _req: &AdminUpdateRequest) -> Result<(), ClientError> {
        self.record(format!("save_admin {}", id))
    }

    async fn create_publisher(&self, req: &NewPublisherRequest) -> Result<Option<String>, ClientError> {
        self.record(format!("create_publisher {}", req.name))?;
        self.created.lock().unwrap().push(req.clone());

        let mut publishers = self.publishers.lock().unwrap();
        let id = format!("new-{}", publishers.len() + 1);
        publishers.push(Publisher {
            id: id.clone(),
            name: req.name.clone(),
            group_id: Some(req.group_id),
            state: req.state,
            hours: req.hours.clone(),
        });
        Ok(Some(id))
    }

    async fn delete_publisher(&self, id: &str) -> Result<(), ClientError> {
        self.record(format!("delete_publisher {}", id))?;
        self.publishers.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn export_report(
        &self,
        kind: ExportKind,
        group_id: u32,
        month: u32,
        year: i32,
    ) -> Result<ExportFile, ClientError> {
        self.record(format!("export {} {} {} {}", kind.path_segment(), group_id, month, year))?;
        Ok(ExportFile {
            file_name: kind.default_file_name(group_id, month, year),
            bytes: b"report-bytes".to_vec(),
        })
    }

    async fn fetch_report(&self, group_id: u32, month: u32, year: i32) -> Result<ReportData, ClientError> {
        self.record(format!("fetch_report {} {} {}", group_id, month, year))?;
        Ok(report::summarize(&self.publishers.lock().unwrap(), group_id, month, year))
    }
}

pub fn record(month: u32, year: i32, hours: u32, studies: u32) -> MonthlyRecord {
    MonthlyRecord {
        month,
        year,
        participated: Some(true),
        studies,
        comment: String::new(),
        hours,
    }
}

pub fn publisher(
    id: &str,
    name: &str,
    group_id: Option<u32>,
    state: PublisherState,
    hours: Vec<MonthlyRecord>,
) -> Publisher {
    Publisher {
        id: id.to_string(),
        name: name.to_string(),
        group_id,
        state,
        hours,
    }
}
