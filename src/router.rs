//! Section switching. Each transition resets the selections that stop making
//! sense on the target screen; loading data is left to the app handlers.

use crate::state::{Section, Session};

impl Session {
    pub(crate) fn show(&mut self, section: Section) {
        self.section = section;
        self.pending_delete = None;
        self.new_publisher = None;
    }

    pub fn enter_groups(&mut self) {
        self.admin_mode = false;
        self.show(Section::Groups);
    }

    pub fn enter_admin(&mut self) {
        self.admin_mode = true;
        self.show(Section::Admin);
    }

    pub fn enter_admin_groups(&mut self) {
        self.admin_mode = true;
        self.show(Section::AdminGroups);
    }

    pub fn back_to_menu(&mut self) {
        self.show(Section::Menu);
        self.group_id = None;
        self.month = None;
        self.clear_publishers();
    }

    /// Picks a group in the report flow; the month is chosen next.
    pub fn select_group(&mut self, group_id: u32) {
        self.group_id = Some(group_id);
        self.show(Section::MonthPicker);
    }

    pub fn back_to_groups(&mut self) {
        self.show(Section::Groups);
        self.group_id = None;
    }

    pub fn back_to_month(&mut self) {
        self.show(Section::MonthPicker);
        self.month = None;
        self.clear_publishers();
    }

    pub fn back_to_admin(&mut self) {
        self.show(Section::Admin);
        self.group_id = None;
        self.clear_publishers();
    }

    /// Section the "back" action leads to from the current one.
    pub fn back_target(&self) -> Section {
        match self.section {
            Section::Menu | Section::Groups | Section::Admin | Section::AdminGroups => Section::Menu,
            Section::MonthPicker => Section::Groups,
            Section::People => Section::MonthPicker,
            Section::AdminPeople => Section::AdminGroups,
        }
    }
}
