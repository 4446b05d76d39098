use std::collections::HashMap;

use chrono::{Datelike, Local};

use crate::filter::NameFilter;
use crate::form::{AdminForm, NewPublisherDraft, PersonForm};
use crate::models::{Group, Publisher};

/// Screen the operator is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Menu,
    Groups,
    MonthPicker,
    People,
    /// Every publisher, with create and delete.
    Admin,
    AdminGroups,
    AdminPeople,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub success: bool,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

/// Delete waiting for the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub id: String,
    pub name: String,
}

impl PendingDelete {
    pub fn message(&self) -> String {
        format!(
            "¿Deseas eliminar a \"{}\"? Esta acción no se puede deshacer.",
            self.name
        )
    }
}

/// Session-scoped client state. Owned by the app and passed to the renderer.
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) section: Section,
    pub(crate) group_id: Option<u32>,
    pub(crate) month: Option<u32>,
    pub(crate) year: i32,
    pub(crate) picker_month: u32,
    pub(crate) admin_mode: bool,
    pub(crate) groups: Vec<Group>,
    pub(crate) publishers: Vec<Publisher>,
    pub(crate) forms: HashMap<String, PersonForm>,
    pub(crate) admin_forms: HashMap<String, AdminForm>,
    pub(crate) searches: HashMap<Section, NameFilter>,
    pub(crate) loading: bool,
    pub(crate) toast: Option<Toast>,
    pub(crate) pending_delete: Option<PendingDelete>,
    pub(crate) new_publisher: Option<NewPublisherDraft>,
}

impl Session {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            section: Section::Menu,
            group_id: None,
            month: None,
            year,
            picker_month: month.clamp(1, 12),
            admin_mode: false,
            groups: Vec::new(),
            publishers: Vec::new(),
            forms: HashMap::new(),
            admin_forms: HashMap::new(),
            searches: HashMap::new(),
            loading: false,
            toast: None,
            pending_delete: None,
            new_publisher: None,
        }
    }

    /// Session defaulting to the current local year and month.
    pub fn today() -> Self {
        let now = Local::now();
        Self::new(now.year(), now.month())
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn group_id(&self) -> Option<u32> {
        self.group_id
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn picker_month(&self) -> u32 {
        self.picker_month
    }

    pub fn admin_mode(&self) -> bool {
        self.admin_mode
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn publishers(&self) -> &[Publisher] {
        &self.publishers
    }

    pub fn publisher(&self, id: &str) -> Option<&Publisher> {
        self.publishers.iter().find(|p| p.id == id)
    }

    pub fn form(&self, id: &str) -> Option<&PersonForm> {
        self.forms.get(id)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut PersonForm> {
        self.forms.get_mut(id)
    }

    pub fn admin_form(&self, id: &str) -> Option<&AdminForm> {
        self.admin_forms.get(id)
    }

    pub fn admin_form_mut(&mut self, id: &str) -> Option<&mut AdminForm> {
        self.admin_forms.get_mut(id)
    }

    pub fn search(&self, section: Section) -> NameFilter {
        self.searches.get(&section).cloned().unwrap_or_default()
    }

    pub fn set_search(&mut self, term: &str) {
        self.searches.insert(self.section, NameFilter::new(term));
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub(crate) fn notify(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn new_publisher(&self) -> Option<&NewPublisherDraft> {
        self.new_publisher.as_ref()
    }

    pub fn new_publisher_mut(&mut self) -> Option<&mut NewPublisherDraft> {
        self.new_publisher.as_mut()
    }

    /// Changes the report year. Cards already on screen are reseeded from the
    /// records of the new (month, year).
    pub fn set_year(&mut self, year: i32) {
        self.year = year;
        if self.month.is_some() {
            self.rebuild_forms();
        }
    }

    /// Month select value. Takes effect when the people list is loaded.
    pub fn set_picker_month(&mut self, month: u32) {
        self.picker_month = month.clamp(1, 12);
    }

    /// Replaces the cached list and rebuilds every card's edit state from it.
    pub(crate) fn replace_publishers(&mut self, publishers: Vec<Publisher>) {
        self.publishers = publishers;
        self.rebuild_forms();
    }

    pub(crate) fn rebuild_forms(&mut self) {
        self.forms.clear();
        self.admin_forms.clear();
        for publisher in &self.publishers {
            if let Some(month) = self.month {
                self.forms.insert(
                    publisher.id.clone(),
                    PersonForm::for_publisher(publisher, month, self.year),
                );
            }
            self.admin_forms
                .insert(publisher.id.clone(), AdminForm::for_publisher(publisher));
        }
    }

    pub(crate) fn clear_publishers(&mut self) {
        self.publishers.clear();
        self.forms.clear();
        self.admin_forms.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::today()
    }
}
