//! The in-memory screen the [`super::Presenter`] draws into.

use std::collections::BTreeSet;

use stockroom_core::{Form, FormKind, ProductId, StatusFilter, StatusTally, StoreId};

/// Independently toggled screen sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Panel {
    StoreDetails,
    FilterBar,
    CreateStoreModal,
    CreateProductModal,
    ConfirmDeleteStore,
    ConfirmDeleteProduct,
    Popup,
}

impl Panel {
    #[must_use]
    pub fn create_modal(kind: FormKind) -> Self {
        match kind {
            FormKind::Store => Panel::CreateStoreModal,
            FormKind::Product => Panel::CreateProductModal,
        }
    }
}

/// Containers that can show a busy placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    StoreList,
    ProductArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Stores,
    Products,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreCard {
    pub id: StoreId,
    pub name: String,
    pub address: String,
    pub floor_area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoreListArea {
    Loading,
    Cards(Vec<StoreCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreHeader {
    pub id: StoreId,
    pub email: String,
    pub phone_number: String,
    pub address: String,
    /// Already formatted for display.
    pub established: String,
    pub floor_area: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub specs: String,
    pub supplier_info: String,
    pub country: String,
    pub company: String,
    /// Filled and empty star counts; `None` renders no stars.
    pub stars: Option<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductArea {
    NoStoreSelected,
    Loading,
    Table(Vec<ProductRow>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSummary {
    pub tally: StatusTally,
    pub active: StatusFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub form: Form,
    pub invalid: BTreeSet<&'static str>,
    pub hint: Option<&'static str>,
}

impl FormView {
    pub(crate) fn new(kind: FormKind) -> Self {
        Self {
            form: Form::new(kind),
            invalid: BTreeSet::new(),
            hint: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub title: String,
    pub store_list: StoreListArea,
    pub highlighted_store: Option<StoreId>,
    pub store_header: Option<StoreHeader>,
    pub product_area: ProductArea,
    pub summary: Option<StatusSummary>,
    pub store_search: String,
    pub product_search: String,
    pub visible: BTreeSet<Panel>,
    pub popup: Option<String>,
    pub store_form: FormView,
    pub product_form: FormView,
    pub error: Option<String>,
    /// Set when the backend answered 404; replaces the whole page.
    pub not_found: bool,
}

impl Screen {
    #[must_use]
    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.contains(&panel)
    }

    #[must_use]
    pub fn form(&self, kind: FormKind) -> &FormView {
        match kind {
            FormKind::Store => &self.store_form,
            FormKind::Product => &self.product_form,
        }
    }

    /// Rows of the product table, if one is rendered.
    #[must_use]
    pub fn product_rows(&self) -> Option<&[ProductRow]> {
        match &self.product_area {
            ProductArea::Table(rows) => Some(rows),
            _ => None,
        }
    }

    #[must_use]
    pub fn store_cards(&self) -> Option<&[StoreCard]> {
        match &self.store_list {
            StoreListArea::Cards(cards) => Some(cards),
            StoreListArea::Loading => None,
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            title: super::NO_STORE_TITLE.to_string(),
            store_list: StoreListArea::Cards(Vec::new()),
            highlighted_store: None,
            store_header: None,
            product_area: ProductArea::NoStoreSelected,
            summary: None,
            store_search: String::new(),
            product_search: String::new(),
            visible: BTreeSet::new(),
            popup: None,
            store_form: FormView::new(FormKind::Store),
            product_form: FormView::new(FormKind::Product),
            error: None,
            not_found: false,
        }
    }
}
