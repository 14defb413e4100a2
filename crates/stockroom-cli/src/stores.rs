//! One-shot `stores` subcommands. Each one scripts the same actions the
//! shell would send and leaves the final screen for `main` to print.

use clap::Subcommand;
use stockroom_core::{FormKind, StoreId};

use crate::coordinator::{Action, DeleteTarget};
use crate::presenter::SearchScope;
use crate::session::Session;

/// Sub-commands available under `stores`.
#[derive(Debug, Subcommand)]
pub enum StoresCommands {
    /// List every store
    List,
    /// Search stores by name or address prefix, or part of the floor area
    Search {
        /// Text to match (case-insensitive)
        text: String,
    },
    /// Create a store
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone_number: String,
        #[arg(long)]
        address: String,
        /// Opening date as YYYY-MM-DD
        #[arg(long)]
        established: String,
        /// Floor area in square meters
        #[arg(long)]
        floor_area: String,
    },
    /// Delete a store and everything in it
    Delete {
        /// Store id
        #[arg(value_parser = positive_id)]
        id: StoreId,
    },
}

/// Backend ids start at 1.
pub(crate) fn positive_id(raw: &str) -> Result<i64, String> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        Ok(id) => Err(format!("ids start at 1, got {id}")),
        Err(e) => Err(e.to_string()),
    }
}

pub(crate) async fn run_stores(session: &mut Session, command: StoresCommands) {
    session.run(Action::Load).await;
    match command {
        StoresCommands::List => {}
        StoresCommands::Search { text } => {
            session.submit(Action::EditSearch {
                scope: SearchScope::Stores,
                text,
            });
            session.run(Action::SubmitSearch(SearchScope::Stores)).await;
        }
        StoresCommands::Create {
            name,
            email,
            phone_number,
            address,
            established,
            floor_area,
        } => {
            session
                .fill_and_submit(
                    FormKind::Store,
                    &[
                        ("Name", name.as_str()),
                        ("Email", email.as_str()),
                        ("PhoneNumber", phone_number.as_str()),
                        ("Address", address.as_str()),
                        ("Established", established.as_str()),
                        ("FloorArea", floor_area.as_str()),
                    ],
                )
                .await;
        }
        StoresCommands::Delete { id } => {
            session.run(Action::SelectStore(id)).await;
            session.submit(Action::RequestDeleteStore);
            session
                .run(Action::ConfirmDelete(DeleteTarget::Store))
                .await;
        }
    }
}
