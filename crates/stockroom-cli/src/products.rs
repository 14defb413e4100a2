//! One-shot `products` subcommands, scoped to one store.

use clap::Subcommand;
use stockroom_core::{FormKind, ProductId, SortKey, StatusFilter, StoreId};

use crate::coordinator::{Action, DeleteTarget};
use crate::presenter::SearchScope;
use crate::session::Session;
use crate::stores::positive_id;

/// Sub-commands available under `products`.
#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// Show a store's products with status counts
    List {
        /// Store id
        #[arg(value_parser = positive_id)]
        store: StoreId,
        /// Only show products with this status (all, ok, storage, out)
        #[arg(long)]
        status: Option<StatusFilter>,
    },
    /// Search a store's products
    Search {
        /// Store id
        #[arg(value_parser = positive_id)]
        store: StoreId,
        /// Prefix of any text column, or part of the price
        text: String,
    },
    /// Sort a store's products by a column
    Sort {
        /// Store id
        #[arg(value_parser = positive_id)]
        store: StoreId,
        /// Column label or field name (e.g. Price, SupplierInfo)
        column: SortKey,
        #[arg(long)]
        descending: bool,
    },
    /// Add a product to a store
    Create {
        /// Store id
        #[arg(value_parser = positive_id)]
        store: StoreId,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        specs: String,
        /// Whole number from 1 to 5
        #[arg(long)]
        rating: String,
        #[arg(long)]
        supplier_info: String,
        #[arg(long)]
        country: String,
        #[arg(long)]
        company: String,
        /// OK, STORAGE or OUT_OF_STOCK
        #[arg(long, default_value = "OK")]
        status: String,
    },
    /// Remove a product from a store
    Delete {
        /// Store id
        #[arg(value_parser = positive_id)]
        store: StoreId,
        /// Product id
        #[arg(value_parser = positive_id)]
        id: ProductId,
    },
}

impl ProductsCommands {
    fn store(&self) -> StoreId {
        match self {
            ProductsCommands::List { store, .. }
            | ProductsCommands::Search { store, .. }
            | ProductsCommands::Sort { store, .. }
            | ProductsCommands::Create { store, .. }
            | ProductsCommands::Delete { store, .. } => *store,
        }
    }
}

pub(crate) async fn run_products(session: &mut Session, command: ProductsCommands) {
    session.run(Action::Load).await;
    session.run(Action::SelectStore(command.store())).await;

    match command {
        ProductsCommands::List { status, .. } => {
            if let Some(filter) = status {
                session.run(Action::SetFilter(filter)).await;
            }
        }
        ProductsCommands::Search { text, .. } => {
            session.submit(Action::EditSearch {
                scope: SearchScope::Products,
                text,
            });
            session.run(Action::SubmitSearch(SearchScope::Products)).await;
        }
        ProductsCommands::Sort {
            column, descending, ..
        } => {
            // The first sort of a session is ascending; a second flips it.
            session.run(Action::Sort(column)).await;
            if descending {
                session.run(Action::Sort(column)).await;
            }
        }
        ProductsCommands::Create {
            name,
            price,
            specs,
            rating,
            supplier_info,
            country,
            company,
            status,
            ..
        } => {
            session
                .fill_and_submit(
                    FormKind::Product,
                    &[
                        ("Name", name.as_str()),
                        ("Price", price.as_str()),
                        ("Specs", specs.as_str()),
                        ("Rating", rating.as_str()),
                        ("SupplierInfo", supplier_info.as_str()),
                        ("MadeIn", country.as_str()),
                        ("ProductionCompanyName", company.as_str()),
                        ("Status", status.as_str()),
                    ],
                )
                .await;
        }
        ProductsCommands::Delete { id, .. } => {
            session.submit(Action::RequestDeleteProduct(id));
            session
                .run(Action::ConfirmDelete(DeleteTarget::Product))
                .await;
        }
    }
}
