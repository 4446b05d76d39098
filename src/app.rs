use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::api::{ExportKind, ReportsApi, SaveMonthRequest};
use crate::error::ClientError;
use crate::form::{Field, NewPublisherDraft, PersonForm, parse_group_id};
use crate::models::{PublisherState, ReportData};
use crate::reconcile::{self, Reconciled};
use crate::report;
use crate::state::{PendingDelete, Section, Session, Toast};
use crate::view::{self, Screen};

/// Admin-form input addressed by the `admin-set` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminField {
    Name,
    Group,
    State,
}

/// Action handlers over one owned session.
///
/// Each handler raises the loading flag for the duration of its request and
/// clears it on every path. Failures are logged and turned into a single
/// generic toast; the cached state only changes after the backend confirms.
pub struct App {
    api: Arc<dyn ReportsApi>,
    session: Session,
    export_dir: PathBuf,
}

impl App {
    pub fn new(api: Arc<dyn ReportsApi>, session: Session, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            session,
            export_dir: export_dir.into(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn screen(&self) -> Screen {
        view::render(&self.session)
    }

    fn fail(&mut self, message: &str, err: &ClientError) {
        error!("{}: {}", message, err);
        self.session.notify(Toast::failure(message));
    }

    pub async fn open_groups(&mut self) {
        self.session.enter_groups();
        self.load_groups().await;
    }

    pub async fn open_admin(&mut self) {
        self.session.enter_admin();
        self.load_all_publishers().await;
    }

    pub async fn open_admin_groups(&mut self) {
        self.session.enter_admin_groups();
        self.load_groups().await;
    }

    pub fn back_to_menu(&mut self) {
        self.session.back_to_menu();
    }

    /// Leaves the current section the way its back button does.
    pub async fn back(&mut self) {
        match self.session.section() {
            Section::People => self.session.back_to_month(),
            Section::MonthPicker => self.session.back_to_groups(),
            Section::AdminPeople => self.open_admin_groups().await,
            _ => self.session.back_to_menu(),
        }
    }

    async fn load_groups(&mut self) {
        self.session.set_loading(true);
        match self.api.list_groups().await {
            Ok(groups) => {
                debug!("loaded {} groups", groups.len());
                self.session.groups = groups;
            }
            Err(e) => self.fail("Error al cargar los grupos", &e),
        }
        self.session.set_loading(false);
    }

    /// Opens a group: the report flow goes to the month picker, admin mode
    /// loads the group's people as admin cards.
    pub async fn select_group(&mut self, group_id: u32) {
        if self.session.section() == Section::AdminGroups {
            self.session.group_id = Some(group_id);
            self.load_admin_group(group_id).await;
        } else {
            self.session.select_group(group_id);
        }
    }

    async fn load_admin_group(&mut self, group_id: u32) {
        self.session.set_loading(true);
        match self.api.list_group_publishers(group_id).await {
            Ok(publishers) => {
                self.session.replace_publishers(publishers);
                self.session.show(Section::AdminPeople);
            }
            Err(e) => self.fail("Error al cargar las personas", &e),
        }
        self.session.set_loading(false);
    }

    /// Loads the selected group's people for `month`.
    pub async fn load_people(&mut self, month: u32) {
        let Some(group_id) = self.session.group_id() else {
            warn!("load_people without a selected group");
            return;
        };
        self.session.set_picker_month(month);
        self.session.month = Some(self.session.picker_month());

        self.session.set_loading(true);
        match self.api.list_group_publishers(group_id).await {
            Ok(publishers) => {
                info!("loaded {} publishers for group {}", publishers.len(), group_id);
                self.session.replace_publishers(publishers);
                self.session.show(Section::People);
            }
            Err(e) => self.fail("Error al cargar las personas", &e),
        }
        self.session.set_loading(false);
    }

    pub async fn load_all_publishers(&mut self) {
        self.session.set_loading(true);
        match self.api.list_all_publishers().await {
            Ok(mut publishers) => {
                reconcile::sort_by_group(&mut publishers);
                self.session.replace_publishers(publishers);
            }
            Err(e) => self.fail("Error al cargar los publishers", &e),
        }
        self.session.set_loading(false);
    }

    pub fn set_field(&mut self, id: &str, field: Field, value: &str) -> Result<(), ClientError> {
        let form = self
            .session
            .form_mut(id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        form.set(field, value)
    }

    /// Switches a card's status selector. The card is rebuilt from the cached
    /// record right away; unsaved edits in its inputs are discarded.
    pub fn change_state(&mut self, id: &str, state: PublisherState) -> Result<(), ClientError> {
        let Some(month) = self.session.month() else {
            return Err(ClientError::Validation("no month selected".to_string()));
        };
        let year = self.session.year();
        let publisher = self
            .session
            .publishers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;

        publisher.state = state;
        let form = PersonForm::for_publisher(publisher, month, year);
        self.session.forms.insert(id.to_string(), form);
        Ok(())
    }

    /// Saves one month's record and status for a person.
    pub async fn save_person(&mut self, id: &str) {
        let Some(month) = self.session.month() else {
            warn!("save_person without a selected month");
            return;
        };
        let year = self.session.year();
        let Some(form) = self.session.form(id) else {
            warn!("save_person for unknown publisher {}", id);
            return;
        };
        let record = form.to_record(month, year);
        let req = SaveMonthRequest {
            hours: record.clone(),
            state: form.state,
        };

        self.session.set_loading(true);
        match self.api.save_month(id, &req).await {
            Ok(()) => {
                let outcome = reconcile::apply_saved_month(&mut self.session.publishers, id, req.state, record);
                if outcome == Reconciled::Missing {
                    warn!("saved publisher {} is not in the cached list", id);
                }
                info!("saved {}/{} for publisher {} ({:?})", month, year, id, outcome);
                self.session.notify(Toast::success("Cambios guardados correctamente"));
            }
            Err(e) => self.fail("Error al guardar cambios", &e),
        }
        self.session.set_loading(false);
    }

    pub fn set_admin_field(&mut self, id: &str, field: AdminField, value: &str) -> Result<(), ClientError> {
        let form = self
            .session
            .admin_form_mut(id)
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        match field {
            AdminField::Name => form.name = value.to_string(),
            AdminField::Group => form.group_id = parse_group_id(value)?,
            AdminField::State => form.state = value.parse().map_err(ClientError::Validation)?,
        }
        Ok(())
    }

    /// Saves name, group and status from an admin card.
    pub async fn save_admin(&mut self, id: &str) {
        let Some(form) = self.session.admin_form(id) else {
            warn!("save_admin for unknown publisher {}", id);
            return;
        };
        let req = match form.to_request() {
            Ok(req) => req,
            Err(e) => {
                debug!("admin save rejected locally: {}", e);
                self.session.notify(Toast::failure("El nombre no puede estar vacío"));
                return;
            }
        };

        self.session.set_loading(true);
        match self.api.save_admin(id, &req).await {
            Ok(()) => {
                reconcile::apply_admin_update(&mut self.session.publishers, id, &req);
                self.session.notify(Toast::success("Cambios guardados correctamente"));
            }
            Err(e) => self.fail("Error al guardar cambios", &e),
        }
        self.session.set_loading(false);
    }

    pub fn open_new_publisher(&mut self) {
        self.session.new_publisher = Some(NewPublisherDraft::default());
    }

    pub fn close_new_publisher(&mut self) {
        self.session.new_publisher = None;
    }

    pub fn set_new_field(&mut self, field: AdminField, value: &str) -> Result<(), ClientError> {
        let draft = self
            .session
            .new_publisher_mut()
            .ok_or_else(|| ClientError::Validation("new publisher form is closed".to_string()))?;
        match field {
            AdminField::Name => draft.name = value.to_string(),
            AdminField::Group => draft.group_id = parse_group_id(value)?,
            AdminField::State => draft.state = value.parse().map_err(ClientError::Validation)?,
        }
        Ok(())
    }

    /// Submits the new-publisher form. An empty name never reaches the backend.
    pub async fn create_publisher(&mut self) {
        let Some(draft) = self.session.new_publisher() else {
            warn!("create_publisher with the form closed");
            return;
        };
        let req = match draft.to_request() {
            Ok(req) => req,
            Err(e) => {
                debug!("create rejected locally: {}", e);
                self.session.notify(Toast::failure("El nombre es requerido"));
                return;
            }
        };

        self.session.set_loading(true);
        match self.api.create_publisher(&req).await {
            Ok(id) => {
                info!("created publisher {:?}", id);
                self.session.notify(Toast::success("Publisher creado correctamente"));
                self.close_new_publisher();
                self.load_all_publishers().await;
            }
            Err(e) => self.fail("Error al crear publisher", &e),
        }
        self.session.set_loading(false);
    }

    /// Asks for confirmation before deleting.
    /// Asks for confirmation before deleting. Only the all-publishers list offers delete.
    pub fn request_delete(&mut self, id: &str) -> Result<(), ClientError> {
        if self.session.section() != Section::Admin {
            return Err(ClientError::Validation(
                "solo se puede eliminar desde la lista de todos los publishers".to_string(),
            ));
        }
        let pending = self
            .session
            .publisher(id)
            .map(|publisher| PendingDelete {
                id: publisher.id.clone(),
                name: publisher.name.clone(),
            })
            .ok_or_else(|| ClientError::NotFound(id.to_string()))?;
        self.session.pending_delete = Some(pending);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.session.pending_delete = None;
    }

    pub async fn confirm_delete(&mut self) {
        let Some(pending) = self.session.pending_delete.take() else {
            return;
        };

        self.session.set_loading(true);
        match self.api.delete_publisher(&pending.id).await {
            Ok(()) => {
                info!("deleted publisher {}", pending.id);
                self.session.notify(Toast::success("Publisher eliminado correctamente"));
                self.load_all_publishers().await;
            }
            Err(e) => self.fail("Error al eliminar publisher", &e),
        }
        self.session.set_loading(false);
    }

    /// Downloads the selected group's report and writes it to the export directory.
    /// Returns the written path. Needs both a group and a month.
    pub async fn export(&mut self, kind: ExportKind) -> Option<PathBuf> {
        let (Some(group_id), Some(month)) = (self.session.group_id(), self.session.month()) else {
            return None;
        };
        let year = self.session.year();

        self.session.set_loading(true);
        let result = match self.api.export_report(kind, group_id, month, year).await {
            Ok(file) => {
                let path = self.export_dir.join(&file.file_name);
                tokio::fs::write(&path, &file.bytes)
                    .await
                    .map(|_| path)
                    .map_err(ClientError::from)
            }
            Err(e) => Err(e),
        };
        self.session.set_loading(false);

        match result {
            Ok(path) => {
                info!("exported report to {}", path.display());
                self.session
                    .notify(Toast::success(format!("Exportando a {}...", kind.label())));
                Some(path)
            }
            Err(e) => {
                self.fail(&format!("Error al exportar a {}", kind.label()), &e);
                None
            }
        }
    }

    /// Report of the selected group and month computed from the cached list.
    pub fn report_preview(&self) -> Option<ReportData> {
        let group_id = self.session.group_id()?;
        let month = self.session.month()?;
        Some(report::summarize(
            self.session.publishers(),
            group_id,
            month,
            self.session.year(),
        ))
    }

    /// Report of the selected group and month as computed by the backend.
    pub async fn fetch_report(&mut self) -> Option<ReportData> {
        let (Some(group_id), Some(month)) = (self.session.group_id(), self.session.month()) else {
            return None;
        };

        self.session.set_loading(true);
        let result = self.api.fetch_report(group_id, month, self.session.year()).await;
        self.session.set_loading(false);

        match result {
            Ok(report) => Some(report),
            Err(e) => {
                self.fail("Error al cargar el informe", &e);
                None
            }
        }
    }
}
