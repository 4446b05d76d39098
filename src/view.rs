//! Declarative view model. `render` is a pure function of the session; front
//! ends redraw from its output instead of patching what they drew before.

use crate::form::{Field, NewPublisherDraft, PersonForm};
use crate::models::{PublisherState, month_name};
use crate::state::{Section, Session, Toast};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCard {
    pub id: u32,
    pub title: String,
    pub hint: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonCard {
    pub id: String,
    pub name: String,
    pub state: PublisherState,
    pub fields: Vec<FieldView>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCard {
    pub id: String,
    pub title: String,
    /// Group badge, only on the all-publishers list.
    pub group_badge: Option<String>,
    pub name: String,
    pub group_id: u32,
    pub state: PublisherState,
    pub deletable: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Menu,
    Groups {
        admin: bool,
        cards: Vec<GroupCard>,
    },
    MonthPicker {
        title: String,
        month: u32,
        year: i32,
    },
    People {
        title: String,
        subtitle: String,
        cards: Vec<PersonCard>,
    },
    Admin {
        title: String,
        cards: Vec<AdminCard>,
    },
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub view: View,
    pub loading: bool,
    pub toast: Option<Toast>,
    pub confirm: Option<String>,
    pub new_publisher: Option<NewPublisherDraft>,
}

pub fn render(session: &Session) -> Screen {
    let view = match session.section() {
        Section::Menu => View::Menu,
        Section::Groups => render_groups(session, false),
        Section::AdminGroups => render_groups(session, true),
        Section::MonthPicker => View::MonthPicker {
            title: group_title(session.group_id()),
            month: session.picker_month(),
            year: session.year(),
        },
        Section::People => render_people(session),
        Section::Admin => render_admin(session, "Administración".to_string(), true),
        Section::AdminPeople => render_admin(
            session,
            format!("Administración - {}", group_title(session.group_id())),
            false,
        ),
    };

    Screen {
        view,
        loading: session.is_loading(),
        toast: session.toast().cloned(),
        confirm: session.pending_delete().map(|pending| pending.message()),
        new_publisher: session.new_publisher().cloned(),
    }
}

fn group_title(group_id: Option<u32>) -> String {
    match group_id {
        Some(id) => format!("Grupo {}", id),
        None => "Grupo".to_string(),
    }
}

fn render_groups(session: &Session, admin: bool) -> View {
    let hint = if admin {
        "Click para administrar"
    } else {
        "Click para ver el grupo"
    };
    let cards = session
        .groups()
        .iter()
        .map(|group| GroupCard {
            id: group.id,
            title: group.name.clone(),
            hint,
        })
        .collect();

    View::Groups { admin, cards }
}

fn render_people(session: &Session) -> View {
    let filter = session.search(Section::People);
    let month = session.month().unwrap_or(session.picker_month());

    let cards = session
        .publishers()
        .iter()
        .map(|publisher| {
            let form = session
                .form(&publisher.id)
                .cloned()
                .unwrap_or_else(|| PersonForm::for_publisher(publisher, month, session.year()));
            PersonCard {
                id: publisher.id.clone(),
                name: publisher.display_name().to_string(),
                state: form.state,
                fields: field_views(&form),
                visible: filter.matches(&publisher.name),
            }
        })
        .collect();

    View::People {
        title: group_title(session.group_id()),
        subtitle: format!(
            "Informe de {} {}",
            month_name(month).unwrap_or_default(),
            session.year()
        ),
        cards,
    }
}

fn field_views(form: &PersonForm) -> Vec<FieldView> {
    form.fields()
        .iter()
        .map(|field| {
            let (label, value) = match field {
                Field::Hours => ("Horas", form.hours.clone()),
                Field::Participated => {
                    let label = if form.state.is_base() {
                        "¿Participó en la predicación?"
                    } else {
                        "¿Participó?"
                    };
                    (label, yes_no(form.participated).to_string())
                }
                Field::Studies => ("Estudios", form.studies.clone()),
                Field::Comment => ("Comentario", form.comment.clone()),
            };
            FieldView {
                field: *field,
                label,
                value,
            }
        })
        .collect()
}

pub fn yes_no(value: bool) -> &'static str {
    if value { "Sí" } else { "No" }
}

fn render_admin(session: &Session, title: String, deletable: bool) -> View {
    let filter = session.search(session.section());

    let cards = session
        .publishers()
        .iter()
        .map(|publisher| {
            let (name, group_id, state) = match session.admin_form(&publisher.id) {
                Some(form) => (form.name.clone(), form.group_id, form.state),
                None => (
                    publisher.name.clone(),
                    publisher.group_id.unwrap_or(1),
                    publisher.state,
                ),
            };
            AdminCard {
                id: publisher.id.clone(),
                title: publisher.display_name().to_string(),
                group_badge: deletable.then(|| match publisher.group_id {
                    Some(id) => format!("Grupo {}", id),
                    None => "Grupo ?".to_string(),
                }),
                name,
                group_id,
                state,
                deletable,
                visible: filter.matches(&publisher.name),
            }
        })
        .collect();

    View::Admin { title, cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MonthlyRecord, Publisher};

    fn session_with_people() -> Session {
        let mut session = Session::new(2024, 5);
        session.select_group(1);
        session.month = Some(5);
        session.section = Section::People;
        session.replace_publishers(vec![
            Publisher {
                id: "p1".to_string(),
                name: "Ana Pérez".to_string(),
                group_id: Some(1),
                state: PublisherState::Publisher,
                hours: vec![MonthlyRecord {
                    month: 5,
                    year: 2024,
                    participated: Some(true),
                    studies: 2,
                    comment: String::new(),
                    hours: 9,
                }],
            },
            Publisher {
                id: "p2".to_string(),
                name: "Luis".to_string(),
                group_id: Some(1),
                state: PublisherState::RegularPioneer,
                hours: Vec::new(),
            },
        ]);
        session
    }

    fn people_cards(screen: &Screen) -> &[PersonCard] {
        match &screen.view {
            View::People { cards, .. } => cards,
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn person_cards_branch_on_status() {
        let screen = render(&session_with_people());
        let cards = people_cards(&screen);

        assert_eq!(cards[0].fields.len(), 3);
        assert!(cards[0].fields.iter().all(|f| f.field != Field::Hours));
        assert_eq!(cards[0].fields[0].label, "¿Participó en la predicación?");
        assert_eq!(cards[1].fields[0].field, Field::Hours);
        assert_eq!(cards[1].fields[1].label, "¿Participó?");
    }

    #[test]
    fn subtitle_names_the_month() {
        let screen = render(&session_with_people());
        match screen.view {
            View::People { title, subtitle, .. } => {
                assert_eq!(title, "Grupo 1");
                assert_eq!(subtitle, "Informe de Mayo 2024");
            }
            other => panic!("unexpected view {:?}", other),
        }
    }

    #[test]
    fn search_toggles_visibility() {
        let mut session = session_with_people();
        session.set_search("zzz");
        assert!(people_cards(&render(&session)).iter().all(|c| !c.visible));

        session.set_search("");
        assert!(people_cards(&render(&session)).iter().all(|c| c.visible));

        session.set_search("PÉR");
        let screen = render(&session);
        let visible: Vec<_> = people_cards(&screen)
            .iter()
            .filter(|c| c.visible)
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(visible, vec!["p1"]);
    }

    #[test]
    fn render_is_pure() {
        let session = session_with_people();
        assert_eq!(render(&session), render(&session));
    }

    #[test]
    fn admin_list_shows_group_badges() {
        let mut session = session_with_people();
        session.section = Section::Admin;
        session.publishers[1].group_id = None;

        match render(&session).view {
            View::Admin { cards, .. } => {
                assert_eq!(cards[0].group_badge.as_deref(), Some("Grupo 1"));
                assert_eq!(cards[1].group_badge.as_deref(), Some("Grupo ?"));
                assert!(cards.iter().all(|c| c.deletable));
            }
            other => panic!("unexpected view {:?}", other),
        }
    }
}
