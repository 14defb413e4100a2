//! Controller side of the client.
//!
//! The [`Coordinator`] turns [`Action`]s into presenter updates and backend
//! [`Task`]s, then folds each task's [`Completion`] back into the screen.
//! Requests are never cancelled; instead every product-area and store-list
//! request carries an epoch, and a completion older than the latest request
//! for its region is dropped so the last user intent wins.

mod action;
mod state;

use std::time::Duration;

pub use action::{Action, Completion, DeleteTarget, ProductsPurpose, Task, TaskKind};
pub use state::UiState;

use stockroom_client::{filter_fragment, GatewayError, InventoryClient};
use stockroom_core::{
    sort_products, validate_form, Form, FormKind, NewProduct, NewStore, SortKey,
    StatusFilter, StoreId, ValidationReport,
};

use crate::presenter::{Panel, Presenter, Region, Screen, SearchScope};
use stockroom_core::{Product, Store};

const STORE_CREATED: &str = "The store has been successfully created!";
const STORE_DELETED: &str = "The store has been successfully deleted!";
const PRODUCT_CREATED: &str = "The product has been successfully created!";
const PRODUCT_DELETED: &str = "The product has been successfully deleted!";

pub struct Coordinator {
    gateway: InventoryClient,
    presenter: Presenter,
    state: UiState,
    /// Last store list received, used to fill the detail header on selection.
    stores: Vec<Store>,
    notification_ttl: Duration,
}

impl Coordinator {
    #[must_use]
    pub fn new(gateway: InventoryClient, notification_ttl: Duration) -> Self {
        Self {
            gateway,
            presenter: Presenter::new(),
            state: UiState::default(),
            stores: Vec::new(),
            notification_ttl,
        }
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        self.presenter.screen()
    }

    #[must_use]
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Handle one user action.
    pub fn dispatch(&mut self, action: Action) -> Vec<Task> {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::Load => vec![self.load_stores(true)],
            Action::SelectStore(store_id) => self.select_store(store_id),
            Action::SetFilter(filter) => self.set_filter(filter),
            Action::Sort(key) => self.sort(key),
            Action::EditSearch { scope, text } => {
                self.edit_search(scope, &text);
                Vec::new()
            }
            Action::SubmitSearch(scope) => self.submit_search(scope),
            Action::ClearSearch(scope) => self.clear_search(scope),
            Action::OpenForm(kind) => {
                self.open_form(kind);
                Vec::new()
            }
            Action::EditField { form, field, value } => {
                if !self.presenter.set_form_field(form, &field, &value) {
                    tracing::warn!(%form, field = %field, "no such field");
                }
                Vec::new()
            }
            Action::SubmitForm(kind) => self.submit_form(kind),
            Action::CancelForm(kind) => {
                self.presenter.clear_form(kind);
                self.presenter.hide(Panel::create_modal(kind));
                self.state.pending_validation_error = false;
                Vec::new()
            }
            Action::RequestDeleteStore => {
                if self.state.selected_store.is_some() {
                    self.presenter.show(Panel::ConfirmDeleteStore);
                }
                Vec::new()
            }
            Action::RequestDeleteProduct(product_id) => {
                if self.state.selected_store.is_some() {
                    self.state.selected_product = Some(product_id);
                    self.presenter.show(Panel::ConfirmDeleteProduct);
                }
                Vec::new()
            }
            Action::ConfirmDelete(target) => self.confirm_delete(target),
            Action::CancelDelete(target) => {
                match target {
                    DeleteTarget::Store => self.presenter.hide(Panel::ConfirmDeleteStore),
                    DeleteTarget::Product => {
                        self.state.selected_product = None;
                        self.presenter.hide(Panel::ConfirmDeleteProduct);
                    }
                }
                Vec::new()
            }
            Action::DismissPopup => {
                self.presenter.hide_popup();
                Vec::new()
            }
        }
    }

    /// Fold a finished task back into state and screen. May schedule follow-ups.
    pub fn apply(&mut self, completion: Completion) -> Vec<Task> {
        match completion {
            Completion::StoresLoaded {
                epoch,
                reset_selection,
                result,
            } => {
                self.stores_loaded(epoch, reset_selection, result);
                Vec::new()
            }
            Completion::ProductsLoaded {
                epoch,
                store_id,
                purpose,
                result,
            } => {
                self.products_loaded(epoch, store_id, purpose, result);
                Vec::new()
            }
            Completion::StoreCreated(result) => match result {
                Ok(store) => {
                    tracing::info!(store_id = store.id, name = %store.name, "store created");
                    self.presenter.clear_form(FormKind::Store);
                    self.presenter.hide(Panel::CreateStoreModal);
                    vec![self.load_stores(false), self.notify(STORE_CREATED)]
                }
                Err(e) => {
                    self.report_error("create store", &e);
                    Vec::new()
                }
            },
            Completion::ProductCreated { store_id, result } => match result {
                Ok(product) => {
                    tracing::info!(store_id, product_id = product.id, "product created");
                    self.presenter.clear_form(FormKind::Product);
                    self.presenter.hide(Panel::CreateProductModal);
                    let mut tasks = vec![self.notify(PRODUCT_CREATED)];
                    if self.state.selected_store == Some(store_id) {
                        tasks.push(self.load_products(store_id, "", ProductsPurpose::Full));
                    }
                    tasks
                }
                Err(e) => {
                    self.report_error("create product", &e);
                    Vec::new()
                }
            },
            Completion::StoreDeleted { store_id, result } => match result {
                Ok(()) => {
                    tracing::info!(store_id, "store deleted");
                    if self.state.selected_store == Some(store_id) {
                        self.state.deselect_store();
                        self.presenter.show_no_store_selected();
                    }
                    vec![self.load_stores(true), self.notify(STORE_DELETED)]
                }
                Err(e) => {
                    self.report_error("delete store", &e);
                    Vec::new()
                }
            },
            Completion::ProductDeleted {
                store_id,
                product_id,
                result,
            } => match result {
                Ok(()) => {
                    tracing::info!(store_id, product_id, "product deleted");
                    if self.state.selected_product == Some(product_id) {
                        self.state.selected_product = None;
                    }
                    let mut tasks = vec![self.notify(PRODUCT_DELETED)];
                    if self.state.selected_store == Some(store_id) {
                        tasks.push(self.load_products(store_id, "", ProductsPurpose::Full));
                    }
                    tasks
                }
                Err(e) => {
                    self.report_error("delete product", &e);
                    Vec::new()
                }
            },
            Completion::PopupExpired { epoch } => {
                if self.state.is_current_popup(epoch) {
                    self.presenter.hide_popup();
                }
                Vec::new()
            }
        }
    }

    fn select_store(&mut self, store_id: StoreId) -> Vec<Task> {
        if store_id <= 0 {
            tracing::warn!(store_id, "ignoring selection of invalid store id");
            return Vec::new();
        }
        if self.state.selected_store == Some(store_id) {
            return Vec::new();
        }

        self.state.selected_store = Some(store_id);
        self.state.selected_product = None;
        self.state.product_search_text.clear();
        self.state.active_filter = StatusFilter::All;
        self.presenter.clear_search(SearchScope::Products);
        self.presenter.highlight_store(Some(store_id));
        self.presenter.clear_status_summary();
        match self.stores.iter().find(|s| s.id == store_id) {
            Some(store) => self.presenter.render_store_header(store),
            None => {
                tracing::warn!(store_id, "selected store is not in the loaded list");
                self.presenter.clear_store_header();
            }
        }
        self.presenter.show_loading(Region::ProductArea);
        vec![self.load_products(store_id, "", ProductsPurpose::Full)]
    }

    fn set_filter(&mut self, filter: StatusFilter) -> Vec<Task> {
        let Some(store_id) = self.state.selected_store else {
            return Vec::new();
        };
        self.state.active_filter = filter;
        self.state.product_search_text.clear();
        self.presenter.set_active_filter(filter);
        self.presenter.show_loading(Region::ProductArea);
        vec![self.load_products(store_id, &filter_fragment(filter), ProductsPurpose::Table)]
    }

    /// Sort always works on the full, unfiltered list. The direction flips on
    /// every sort regardless of column.
    fn sort(&mut self, key: SortKey) -> Vec<Task> {
        let Some(store_id) = self.state.selected_store else {
            return Vec::new();
        };
        let descending = self.state.sort_descending;
        self.state.sort_descending = !descending;
        self.state.active_filter = StatusFilter::All;
        self.presenter.set_active_filter(StatusFilter::All);
        self.presenter.show_loading(Region::ProductArea);
        vec![self.load_products(
            store_id,
            "",
            ProductsPurpose::Sorted { key, descending },
        )]
    }

    fn edit_search(&mut self, scope: SearchScope, text: &str) {
        let lowered = text.to_lowercase();
        match scope {
            SearchScope::Stores => self.state.store_search_text = lowered,
            SearchScope::Products => self.state.product_search_text = lowered,
        }
        self.presenter.set_search_text(scope, text);
    }

    fn submit_search(&mut self, scope: SearchScope) -> Vec<Task> {
        match scope {
            SearchScope::Stores => {
                let text = std::mem::take(&mut self.state.store_search_text);
                let epoch = self.state.next_store_epoch();
                let gateway = self.gateway.clone();
                self.presenter.show_loading(Region::StoreList);
                vec![Task::request(async move {
                    Completion::StoresLoaded {
                        epoch,
                        reset_selection: false,
                        result: gateway.search_stores(&text).await,
                    }
                })]
            }
            SearchScope::Products => {
                let Some(store_id) = self.state.selected_store else {
                    return Vec::new();
                };
                let text = std::mem::take(&mut self.state.product_search_text);
                let epoch = self.state.next_product_epoch();
                let gateway = self.gateway.clone();
                self.presenter.show_loading(Region::ProductArea);
                vec![Task::request(async move {
                    Completion::ProductsLoaded {
                        epoch,
                        store_id,
                        purpose: ProductsPurpose::Table,
                        result: gateway.search_products(store_id, &text).await,
                    }
                })]
            }
        }
    }

    fn clear_search(&mut self, scope: SearchScope) -> Vec<Task> {
        self.presenter.clear_search(scope);
        match scope {
            SearchScope::Stores => {
                self.state.store_search_text.clear();
                vec![self.load_stores(false)]
            }
            SearchScope::Products => {
                self.state.product_search_text.clear();
                match self.state.selected_store {
                    Some(store_id) => {
                        vec![self.load_products(store_id, "", ProductsPurpose::Full)]
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    fn open_form(&mut self, kind: FormKind) {
        if kind == FormKind::Product && !self.state.selected_store.is_some_and(|id| id > 0) {
            tracing::info!("select a store before adding a product");
            return;
        }
        self.presenter.show(Panel::create_modal(kind));
    }

    /// Validation gates the request: nothing is sent unless the form passes.
    fn submit_form(&mut self, kind: FormKind) -> Vec<Task> {
        let form = self.presenter.form(kind).clone();
        let task = match kind {
            FormKind::Store => checked(&form, NewStore::from_form).map(|store| {
                let gateway = self.gateway.clone();
                Task::request(async move {
                    Completion::StoreCreated(gateway.create_store(&store).await)
                })
            }),
            FormKind::Product => {
                let Some(store_id) = self.state.selected_store else {
                    return Vec::new();
                };
                checked(&form, NewProduct::from_form).map(|product| {
                    let gateway = self.gateway.clone();
                    Task::request(async move {
                        Completion::ProductCreated {
                            store_id,
                            result: gateway.create_product(store_id, &product).await,
                        }
                    })
                })
            }
        };

        match task {
            Ok(task) => {
                self.state.pending_validation_error = false;
                self.presenter.mark_invalid(kind, &ValidationReport::default());
                vec![task]
            }
            Err(report) => {
                tracing::debug!(%kind, invalid = ?report.invalid, "form blocked by validation");
                self.state.pending_validation_error = true;
                self.presenter.mark_invalid(kind, &report);
                Vec::new()
            }
        }
    }

    fn confirm_delete(&mut self, target: DeleteTarget) -> Vec<Task> {
        let Some(store_id) = self.state.selected_store else {
            return Vec::new();
        };
        let gateway = self.gateway.clone();
        match target {
            DeleteTarget::Store => {
                self.presenter.hide(Panel::ConfirmDeleteStore);
                vec![Task::request(async move {
                    Completion::StoreDeleted {
                        store_id,
                        result: gateway.delete_store(store_id).await,
                    }
                })]
            }
            DeleteTarget::Product => {
                self.presenter.hide(Panel::ConfirmDeleteProduct);
                let Some(product_id) = self.state.selected_product else {
                    return Vec::new();
                };
                vec![Task::request(async move {
                    Completion::ProductDeleted {
                        store_id,
                        product_id,
                        result: gateway.delete_product(store_id, product_id).await,
                    }
                })]
            }
        }
    }

    fn stores_loaded(
        &mut self,
        epoch: u64,
        reset_selection: bool,
        result: Result<Vec<Store>, GatewayError>,
    ) {
        if !self.state.is_current_store_request(epoch) {
            tracing::debug!(epoch, "dropping stale store list");
            return;
        }
        match result {
            Ok(stores) => {
                self.presenter.clear_error();
                self.presenter.render_stores(&stores);
                self.stores = stores;
                if reset_selection {
                    self.state.deselect_store();
                    self.presenter.show_no_store_selected();
                }
            }
            Err(e) => {
                self.presenter.render_stores(&self.stores);
                self.report_error("load stores", &e);
            }
        }
    }

    fn products_loaded(
        &mut self,
        epoch: u64,
        store_id: StoreId,
        purpose: ProductsPurpose,
        result: Result<Vec<Product>, GatewayError>,
    ) {
        if !self.state.is_current_product_request(epoch, store_id) {
            tracing::debug!(epoch, store_id, "dropping stale product list");
            return;
        }
        match result {
            Ok(mut products) => {
                self.presenter.clear_error();
                match purpose {
                    ProductsPurpose::Full => {
                        self.state.active_filter = StatusFilter::All;
                        self.presenter.render_product_table(&products);
                        self.presenter.render_status_summary(&products);
                    }
                    ProductsPurpose::Table => self.presenter.render_product_table(&products),
                    ProductsPurpose::Sorted { key, descending } => {
                        sort_products(&mut products, key, descending);
                        self.presenter.render_product_table(&products);
                    }
                }
            }
            Err(e) => {
                self.presenter.render_product_table(&[]);
                self.report_error("load products", &e);
            }
        }
    }

    fn load_stores(&mut self, reset_selection: bool) -> Task {
        let epoch = self.state.next_store_epoch();
        let gateway = self.gateway.clone();
        self.presenter.show_loading(Region::StoreList);
        Task::request(async move {
            Completion::StoresLoaded {
                epoch,
                reset_selection,
                result: gateway.list_stores().await,
            }
        })
    }

    fn load_products(
        &mut self,
        store_id: StoreId,
        filter_fragment: &str,
        purpose: ProductsPurpose,
    ) -> Task {
        let epoch = self.state.next_product_epoch();
        let gateway = self.gateway.clone();
        let filter_fragment = filter_fragment.to_string();
        Task::request(async move {
            Completion::ProductsLoaded {
                epoch,
                store_id,
                purpose,
                result: gateway.list_products(store_id, &filter_fragment).await,
            }
        })
    }

    /// Show a popup and schedule its expiry. A newer popup cancels the older expiry.
    fn notify(&mut self, message: &str) -> Task {
        let epoch = self.state.next_popup_epoch();
        let ttl = self.notification_ttl;
        self.presenter.show_popup(message);
        Task::timer(async move {
            tokio::time::sleep(ttl).await;
            Completion::PopupExpired { epoch }
        })
    }

    fn report_error(&mut self, context: &str, err: &GatewayError) {
        tracing::warn!(context, error = %err, "request failed");
        if err.is_not_found() {
            self.presenter.render_not_found();
        } else {
            self.presenter.show_error(format!("{context} failed: {err}"));
        }
    }
}

/// Run the validation gate, then the type conversion, collecting every
/// offending field into one report.
fn checked<T>(
    form: &Form,
    convert: fn(&Form) -> Result<T, Vec<&'static str>>,
) -> Result<T, ValidationReport> {
    let mut report = validate_form(form);
    match convert(form) {
        Ok(value) if report.is_valid() => Ok(value),
        Ok(_) => Err(report),
        Err(bad) => {
            report.flag(bad);
            Err(report)
        }
    }
}

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod tests;
