//! Line-oriented terminal front end: command parsing and text drawing of a [`Screen`].

use std::fmt;

use crate::api::ExportKind;
use crate::app::{AdminField, App};
use crate::form::Field;
use crate::models::PublisherState;
use crate::models::group::group_ids;
use crate::view::{Screen, View};

pub const HELP: &str = "\
comandos:
  groups | admin | admin-groups | menu | back
  group <n>                  abrir grupo
  month <1-12> | year <n>    cargar personas del mes / cambiar año
  set <id> <campo> <valor>   campos: hours, participated, studies, comment
  state <id> <estado>        cambia el estado y reconstruye la tarjeta
  save <id>
  admin-set <id> name|group|state <valor>
  admin-save <id>
  new | new-set name|group|state <valor> | create | cancel
  delete <id> | confirm | cancel
  search [texto]
  export excel|pdf
  report [remote]
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Menu,
    Groups,
    Admin,
    AdminGroups,
    Back,
    Group(u32),
    Month(u32),
    Year(i32),
    Set { id: String, field: Field, value: String },
    State { id: String, state: PublisherState },
    Save(String),
    AdminSet { id: String, field: AdminField, value: String },
    AdminSave(String),
    New,
    NewSet { field: AdminField, value: String },
    Create,
    Cancel,
    Delete(String),
    Confirm,
    Search(String),
    Export(ExportKind),
    Report { remote: bool },
    Help,
    Quit,
}

fn admin_field(key: &str) -> Result<AdminField, String> {
    match key {
        "name" | "nombre" => Ok(AdminField::Name),
        "group" | "grupo" => Ok(AdminField::Group),
        "state" | "estado" => Ok(AdminField::State),
        other => Err(format!("campo desconocido: {}", other)),
    }
}

/// Splits off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(idx) => (&input[..idx], input[idx..].trim_start()),
        None => (input, ""),
    }
}

fn required<'a>(word: &'a str, what: &str) -> Result<&'a str, String> {
    if word.is_empty() {
        Err(format!("falta {}", what))
    } else {
        Ok(word)
    }
}

fn number<T: std::str::FromStr>(word: &str, what: &str) -> Result<T, String> {
    required(word, what)?
        .parse()
        .map_err(|_| format!("{} inválido: {}", what, word))
}

pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let (verb, rest) = next_word(line);
    if verb.is_empty() {
        return Ok(None);
    }

    let command = match verb.to_lowercase().as_str() {
        "menu" => Command::Menu,
        "groups" | "grupos" => Command::Groups,
        "admin" => Command::Admin,
        "admin-groups" => Command::AdminGroups,
        "back" | "volver" => Command::Back,
        "group" | "grupo" => Command::Group(number(rest.trim(), "grupo")?),
        "month" | "mes" => {
            let month: u32 = number(rest.trim(), "mes")?;
            if !(1..=12).contains(&month) {
                return Err(format!("mes inválido: {}", month));
            }
            Command::Month(month)
        }
        "year" | "año" => Command::Year(number(rest.trim(), "año")?),
        "set" => {
            let (id, rest) = next_word(rest);
            let (key, value) = next_word(rest);
            let field = Field::parse(required(key, "campo")?)
                .ok_or_else(|| format!("campo desconocido: {}", key))?;
            Command::Set {
                id: required(id, "id")?.to_string(),
                field,
                value: value.to_string(),
            }
        }
        "state" | "estado" => {
            let (id, state) = next_word(rest);
            Command::State {
                id: required(id, "id")?.to_string(),
                state: required(state, "estado")?.parse()?,
            }
        }
        "save" | "guardar" => Command::Save(required(rest.trim(), "id")?.to_string()),
        "admin-set" => {
            let (id, rest) = next_word(rest);
            let (key, value) = next_word(rest);
            Command::AdminSet {
                id: required(id, "id")?.to_string(),
                field: admin_field(required(key, "campo")?)?,
                value: value.to_string(),
            }
        }
        "admin-save" => Command::AdminSave(required(rest.trim(), "id")?.to_string()),
        "new" | "nuevo" => Command::New,
        "new-set" => {
            let (key, value) = next_word(rest);
            Command::NewSet {
                field: admin_field(required(key, "campo")?)?,
                value: value.to_string(),
            }
        }
        "create" | "crear" => Command::Create,
        "cancel" | "cancelar" => Command::Cancel,
        "delete" | "eliminar" => Command::Delete(required(rest.trim(), "id")?.to_string()),
        "confirm" | "confirmar" => Command::Confirm,
        "search" | "buscar" => Command::Search(rest.trim().to_string()),
        "export" | "exportar" => match rest.trim().to_lowercase().as_str() {
            "excel" | "xlsx" => Command::Export(ExportKind::Excel),
            "pdf" => Command::Export(ExportKind::Pdf),
            other => return Err(format!("formato desconocido: {}", other)),
        },
        "report" | "informe" => Command::Report {
            remote: rest.trim() == "remote",
        },
        "help" | "ayuda" | "?" => Command::Help,
        "quit" | "exit" | "salir" => Command::Quit,
        other => return Err(format!("comando desconocido: {}", other)),
    };
    Ok(Some(command))
}

/// Runs one command against the app. Returns text to print besides the screen.
pub async fn dispatch(app: &mut App, command: Command) -> Option<String> {
    let result = match command {
        Command::Menu => {
            app.back_to_menu();
            Ok(())
        }
        Command::Groups => {
            app.open_groups().await;
            Ok(())
        }
        Command::Admin => {
            app.open_admin().await;
            Ok(())
        }
        Command::AdminGroups => {
            app.open_admin_groups().await;
            Ok(())
        }
        Command::Back => {
            app.back().await;
            Ok(())
        }
        Command::Group(id) => {
            if !group_ids().any(|g| g == id) {
                return Some(format!("grupo inválido: {}", id));
            }
            app.select_group(id).await;
            Ok(())
        }
        Command::Month(month) => {
            app.load_people(month).await;
            Ok(())
        }
        Command::Year(year) => {
            app.session_mut().set_year(year);
            Ok(())
        }
        Command::Set { id, field, value } => app.set_field(&id, field, &value),
        Command::State { id, state } => app.change_state(&id, state),
        Command::Save(id) => {
            app.save_person(&id).await;
            Ok(())
        }
        Command::AdminSet { id, field, value } => app.set_admin_field(&id, field, &value),
        Command::AdminSave(id) => {
            app.save_admin(&id).await;
            Ok(())
        }
        Command::New => {
            app.open_new_publisher();
            Ok(())
        }
        Command::NewSet { field, value } => app.set_new_field(field, &value),
        Command::Create => {
            app.create_publisher().await;
            Ok(())
        }
        Command::Cancel => {
            app.close_new_publisher();
            app.cancel_delete();
            Ok(())
        }
        Command::Delete(id) => app.request_delete(&id),
        Command::Confirm => {
            app.confirm_delete().await;
            Ok(())
        }
        Command::Search(term) => {
            app.session_mut().set_search(&term);
            Ok(())
        }
        Command::Export(kind) => {
            return app
                .export(kind)
                .await
                .map(|path| format!("guardado en {}", path.display()));
        }
        Command::Report { remote } => {
            let report = if remote {
                app.fetch_report().await
            } else {
                app.report_preview()
            };
            return Some(match report {
                Some(report) => serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|e| format!("no se pudo mostrar el informe: {}", e)),
                None => "selecciona un grupo y un mes".to_string(),
            });
        }
        Command::Help => return Some(HELP.to_string()),
        Command::Quit => return None,
    };

    result.err().map(|e| format!("error: {}", e))
}

/// Plain-text drawing of a [`Screen`].
pub struct TextScreen<'a>(pub &'a Screen);

impl fmt::Display for TextScreen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let screen = self.0;

        match &screen.view {
            View::Menu => {
                f.write_str("== Menú ==\n  groups  - informes por grupo\n  admin   - administración\n")?;
            }
            View::Groups { admin, cards } => {
                let title = if *admin { "Administración - Grupos" } else { "Grupos" };
                writeln!(f, "== {} ==", title)?;
                for card in cards {
                    writeln!(f, "  [{}] {} - {}", card.id, card.title, card.hint)?;
                }
            }
            View::MonthPicker { title, month, year } => {
                writeln!(f, "== {} ==", title)?;
                writeln!(f, "  mes seleccionado: {} / {} (month <n> para cargar)", month, year)?;
            }
            View::People {
                title,
                subtitle,
                cards,
            } => {
                writeln!(f, "== {} ==\n{}", title, subtitle)?;
                for card in cards.iter().filter(|card| card.visible) {
                    writeln!(f, "- {} <{}> [{}]", card.name, card.id, card.state)?;
                    for field in &card.fields {
                        writeln!(f, "    {} ({}): {}", field.label, field.field.key(), field.value)?;
                    }
                }
            }
            View::Admin { title, cards } => {
                writeln!(f, "== {} ==", title)?;
                for card in cards.iter().filter(|card| card.visible) {
                    write!(f, "- {}", card.title)?;
                    if let Some(badge) = &card.group_badge {
                        write!(f, " ({})", badge)?;
                    }
                    writeln!(f, " <{}>", card.id)?;
                    writeln!(
                        f,
                        "    nombre: {} | grupo: {} | estado: {}{}",
                        card.name,
                        card.group_id,
                        card.state,
                        if card.deletable { " | delete" } else { "" }
                    )?;
                }
            }
        }

        if let Some(draft) = &screen.new_publisher {
            writeln!(
                f,
                "[nuevo publisher] nombre: {} | grupo: {} | estado: {}",
                draft.name, draft.group_id, draft.state
            )?;
        }
        if let Some(confirm) = &screen.confirm {
            writeln!(f, "[confirmar] {}", confirm)?;
        }
        if screen.loading {
            f.write_str("cargando...\n")?;
        }
        if let Some(toast) = &screen.toast {
            let mark = if toast.success { "✓" } else { "✗" };
            writeln!(f, "{} {}", mark, toast.message)?;
        }
        Ok(())
    }
}

/// Draws a screen as plain text.
pub fn render_text(screen: &Screen) -> String {
    TextScreen(screen).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(parse_command("groups"), Ok(Some(Command::Groups)));
        assert_eq!(parse_command("  "), Ok(None));
        assert_eq!(parse_command("group 3"), Ok(Some(Command::Group(3))));
        assert!(parse_command("month 13").is_err());
        assert!(parse_command("fly").is_err());
    }

    #[test]
    fn parses_field_edits_with_spaces() {
        assert_eq!(
            parse_command("set p1 comment muy bien este mes"),
            Ok(Some(Command::Set {
                id: "p1".to_string(),
                field: Field::Comment,
                value: "muy bien este mes".to_string(),
            }))
        );
        assert_eq!(
            parse_command("state p1 Precursor Auxiliar Indefinido"),
            Ok(Some(Command::State {
                id: "p1".to_string(),
                state: PublisherState::IndefiniteAuxiliaryPioneer,
            }))
        );
    }

    #[test]
    fn parses_admin_commands() {
        assert_eq!(
            parse_command("admin-set p2 group 4"),
            Ok(Some(Command::AdminSet {
                id: "p2".to_string(),
                field: AdminField::Group,
                value: "4".to_string(),
            }))
        );
        assert_eq!(parse_command("export PDF"), Ok(Some(Command::Export(ExportKind::Pdf))));
        assert!(parse_command("delete").is_err());
    }

    #[test]
    fn draws_toast_and_confirmation() {
        let screen = Screen {
            view: View::Menu,
            loading: false,
            toast: Some(crate::state::Toast::failure("Error al guardar cambios")),
            confirm: Some("¿Deseas eliminar a \"Ana\"?".to_string()),
            new_publisher: None,
        };
        let text = render_text(&screen);
        assert!(text.contains("✗ Error al guardar cambios"));
        assert!(text.contains("[confirmar]"));
    }

    #[test]
    fn draws_admin_cards_with_badge() {
        let card = crate::view::AdminCard {
            id: "p1".to_string(),
            title: "Ana".to_string(),
            group_badge: Some("Grupo 2".to_string()),
            name: "Ana".to_string(),
            group_id: 2,
            state: PublisherState::RegularPioneer,
            deletable: true,
            visible: true,
        };
        let hidden = crate::view::AdminCard {
            id: "p2".to_string(),
            visible: false,
            ..card.clone()
        };
        let screen = Screen {
            view: View::Admin {
                title: "Administración".to_string(),
                cards: vec![card, hidden],
            },
            loading: true,
            toast: None,
            confirm: None,
            new_publisher: None,
        };

        let text = render_text(&screen);
        assert!(text.starts_with("== Administración ==\n"));
        assert!(text.contains("- Ana (Grupo 2) <p1>\n"));
        assert!(text.contains("estado: Precursor Regular | delete"));
        assert!(!text.contains("<p2>"));
        assert!(text.ends_with("cargando...\n"));
    }
}
