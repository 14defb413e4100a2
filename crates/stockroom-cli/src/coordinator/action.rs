use futures::future::BoxFuture;
use futures::FutureExt;
use stockroom_client::GatewayError;
use stockroom_core::{FormKind, Product, ProductId, SortKey, StatusFilter, Store, StoreId};

use crate::presenter::SearchScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Store,
    Product,
}

/// A user intent. Each variant is bound to one control on the screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Page load: fetch the store list and show the empty product area.
    Load,
    SelectStore(StoreId),
    SetFilter(StatusFilter),
    Sort(SortKey),
    EditSearch { scope: SearchScope, text: String },
    SubmitSearch(SearchScope),
    ClearSearch(SearchScope),
    OpenForm(FormKind),
    EditField {
        form: FormKind,
        field: String,
        value: String,
    },
    SubmitForm(FormKind),
    CancelForm(FormKind),
    RequestDeleteStore,
    RequestDeleteProduct(ProductId),
    ConfirmDelete(DeleteTarget),
    CancelDelete(DeleteTarget),
    DismissPopup,
}

/// What to do with a product list once it arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductsPurpose {
    /// Table plus status summary.
    Full,
    /// Table only; the summary keeps the store-wide counts.
    Table,
    Sorted { key: SortKey, descending: bool },
}

/// Result of a finished [`Task`], fed back into the coordinator.
#[derive(Debug)]
pub enum Completion {
    StoresLoaded {
        epoch: u64,
        /// Return to "no store selected" once rendered.
        reset_selection: bool,
        result: Result<Vec<Store>, GatewayError>,
    },
    ProductsLoaded {
        epoch: u64,
        store_id: StoreId,
        purpose: ProductsPurpose,
        result: Result<Vec<Product>, GatewayError>,
    },
    StoreCreated(Result<Store, GatewayError>),
    ProductCreated {
        store_id: StoreId,
        result: Result<Product, GatewayError>,
    },
    StoreDeleted {
        store_id: StoreId,
        result: Result<(), GatewayError>,
    },
    ProductDeleted {
        store_id: StoreId,
        product_id: ProductId,
        result: Result<(), GatewayError>,
    },
    PopupExpired {
        epoch: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// A backend call.
    Request,
    /// A delayed UI change such as popup expiry.
    Timer,
}

/// Deferred work returned by the coordinator. The driver runs it and hands
/// the [`Completion`] back.
pub struct Task {
    pub kind: TaskKind,
    pub future: BoxFuture<'static, Completion>,
}

impl Task {
    pub fn request<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        Self {
            kind: TaskKind::Request,
            future: future.boxed(),
        }
    }

    pub fn timer<F>(future: F) -> Self
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        Self {
            kind: TaskKind::Timer,
            future: future.boxed(),
        }
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("kind", &self.kind).finish_non_exhaustive()
    }
}
