//! Interactive line-oriented front end.
//!
//! Each input line maps to one or more [`Action`]s. The screen is redrawn
//! after every command and again whenever a request or timer completes, so
//! slow responses land while the user keeps typing.

use tokio::io::{AsyncBufReadExt, BufReader};

use stockroom_core::{FormKind, ProductId, SortKey, StatusFilter, StoreId};

use crate::coordinator::{Action, DeleteTarget};
use crate::presenter::{render_text, Panel, Screen, SearchScope};
use crate::session::Session;

pub(crate) const HELP: &str = "\
commands:
  select <id>               show a store and its products
  filter all|ok|storage|out filter the product table by status
  sort <column>             sort products (Name, Price, Specs, SupplierInfo, Country, Company, Rating)
  search-stores <text>      search the store list
  clear-stores              clear the store search
  search-products <text>    search the selected store's products
  clear-products            clear the product search
  new-store | new-product   open a create form
  set <Field> <value>       fill a field of the open form
  submit | cancel           submit or discard the open form
  delete-store              delete the selected store
  delete-product <id>       delete a product of the selected store
  confirm | dismiss         answer a delete prompt, or close the popup
  refresh                   reload the store list
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShellCommand {
    Act(Vec<Action>),
    Help,
    Quit,
}

/// Parse one input line against what is currently on screen. Commands like
/// `set`, `submit` and `confirm` act on whichever form or prompt is open.
pub(crate) fn parse_command(line: &str, screen: &Screen) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (cmd, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(cmd, rest)| (cmd, rest.trim()));

    let single =
        |action: Action| -> Result<ShellCommand, String> { Ok(ShellCommand::Act(vec![action])) };
    match cmd.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Act(Vec::new())),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        "refresh" => single(Action::Load),
        "select" => single(Action::SelectStore(parse_id::<StoreId>(rest, "store")?)),
        "filter" => single(Action::SetFilter(rest.parse::<StatusFilter>()?)),
        "sort" => single(Action::Sort(rest.parse::<SortKey>()?)),
        "search-stores" => Ok(search(SearchScope::Stores, rest)),
        "search-products" => Ok(search(SearchScope::Products, rest)),
        "clear-stores" => single(Action::ClearSearch(SearchScope::Stores)),
        "clear-products" => single(Action::ClearSearch(SearchScope::Products)),
        "new-store" => single(Action::OpenForm(FormKind::Store)),
        "new-product" => single(Action::OpenForm(FormKind::Product)),
        "set" => {
            let form = open_form(screen)?;
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(f, v)| (f, v.trim()));
            if field.is_empty() {
                return Err("usage: set <Field> <value>".to_string());
            }
            single(Action::EditField {
                form,
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        "submit" => single(Action::SubmitForm(open_form(screen)?)),
        "cancel" => single(Action::CancelForm(open_form(screen)?)),
        "delete-store" => single(Action::RequestDeleteStore),
        "delete-product" => single(Action::RequestDeleteProduct(parse_id::<ProductId>(
            rest, "product",
        )?)),
        "confirm" => single(Action::ConfirmDelete(open_prompt(screen)?)),
        "dismiss" => match open_prompt(screen) {
            Ok(target) => single(Action::CancelDelete(target)),
            Err(_) => single(Action::DismissPopup),
        },
        other => Err(format!("unknown command \"{other}\" (try help)")),
    }
}

fn search(scope: SearchScope, text: &str) -> ShellCommand {
    ShellCommand::Act(vec![
        Action::EditSearch {
            scope,
            text: text.to_string(),
        },
        Action::SubmitSearch(scope),
    ])
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, String> {
    raw.parse::<T>()
        .map_err(|_| format!("expected a {what} id, got \"{raw}\""))
}

fn open_form(screen: &Screen) -> Result<FormKind, String> {
    [FormKind::Store, FormKind::Product]
        .into_iter()
        .find(|&kind| screen.is_visible(Panel::create_modal(kind)))
        .ok_or_else(|| "no form is open (new-store or new-product)".to_string())
}

fn open_prompt(screen: &Screen) -> Result<DeleteTarget, String> {
    if screen.is_visible(Panel::ConfirmDeleteStore) {
        Ok(DeleteTarget::Store)
    } else if screen.is_visible(Panel::ConfirmDeleteProduct) {
        Ok(DeleteTarget::Product)
    } else {
        Err("nothing to confirm".to_string())
    }
}

fn print_screen(session: &Session) {
    println!("{}", render_text(session.screen()));
}

/// Read commands from stdin until EOF or `quit`.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub(crate) async fn run_shell(mut session: Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    session.submit(Action::Load);
    print_screen(&session);
    println!("type help for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_command(&line, session.screen()) {
                    Ok(ShellCommand::Quit) => break,
                    Ok(ShellCommand::Help) => println!("{HELP}"),
                    Ok(ShellCommand::Act(actions)) if actions.is_empty() => {}
                    Ok(ShellCommand::Act(actions)) => {
                        for action in actions {
                            session.submit(action);
                        }
                        print_screen(&session);
                    }
                    Err(message) => println!("{message}"),
                }
            }
            applied = session.next_completion(), if session.has_pending() => {
                if applied {
                    print_screen(&session);
                }
            }
        }
    }

    tracing::debug!("shell closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::Status;

    fn screen_with(panels: &[Panel]) -> Screen {
        let mut screen = Screen::default();
        screen.visible.extend(panels.iter().copied());
        screen
    }

    #[test]
    fn parses_navigation_commands() {
        let screen = Screen::default();
        assert_eq!(
            parse_command("select 7", &screen),
            Ok(ShellCommand::Act(vec![Action::SelectStore(7)]))
        );
        assert_eq!(
            parse_command("filter out", &screen),
            Ok(ShellCommand::Act(vec![Action::SetFilter(
                StatusFilter::Only(Status::OutOfStock)
            )]))
        );
        assert_eq!(
            parse_command("  SORT supplierinfo ", &screen),
            Ok(ShellCommand::Act(vec![Action::Sort(SortKey::SupplierInfo)]))
        );
        assert_eq!(parse_command("quit", &screen), Ok(ShellCommand::Quit));
    }

    #[test]
    fn search_edits_then_submits() {
        let cmd = parse_command("search-stores Main Street", &Screen::default()).unwrap();
        assert_eq!(
            cmd,
            ShellCommand::Act(vec![
                Action::EditSearch {
                    scope: SearchScope::Stores,
                    text: "Main Street".to_string(),
                },
                Action::SubmitSearch(SearchScope::Stores),
            ])
        );
    }

    #[test]
    fn set_targets_the_open_form_and_keeps_spaces_in_value() {
        let screen = screen_with(&[Panel::CreateProductModal]);
        assert_eq!(
            parse_command("set Specs 8GB RAM, 256GB", &screen),
            Ok(ShellCommand::Act(vec![Action::EditField {
                form: FormKind::Product,
                field: "Specs".to_string(),
                value: "8GB RAM, 256GB".to_string(),
            }]))
        );
    }

    #[test]
    fn form_commands_need_an_open_form() {
        let screen = Screen::default();
        assert!(parse_command("submit", &screen).is_err());
        assert!(parse_command("set Name x", &screen).is_err());
    }

    #[test]
    fn confirm_and_dismiss_follow_the_open_prompt() {
        let screen = screen_with(&[Panel::ConfirmDeleteProduct]);
        assert_eq!(
            parse_command("confirm", &screen),
            Ok(ShellCommand::Act(vec![Action::ConfirmDelete(
                DeleteTarget::Product
            )]))
        );
        assert_eq!(
            parse_command("dismiss", &screen),
            Ok(ShellCommand::Act(vec![Action::CancelDelete(
                DeleteTarget::Product
            )]))
        );
        assert_eq!(
            parse_command("dismiss", &Screen::default()),
            Ok(ShellCommand::Act(vec![Action::DismissPopup]))
        );
        assert!(parse_command("confirm", &Screen::default()).is_err());
    }

    #[test]
    fn rejects_bad_input() {
        let screen = Screen::default();
        assert!(parse_command("select abc", &screen).is_err());
        assert!(parse_command("filter sold", &screen).is_err());
        assert!(parse_command("sort Weight", &screen).is_err());
        assert!(parse_command("frobnicate", &screen).is_err());
        assert_eq!(
            parse_command("   ", &screen),
            Ok(ShellCommand::Act(Vec::new()))
        );
    }
}
