//! Rendering side of the client.
//!
//! The [`Presenter`] is the only writer to the [`Screen`]. It knows nothing
//! about the network: every method takes already-fetched data and reshapes it
//! for display.

mod screen;
mod text;

pub use screen::{
    FormView, Panel, ProductArea, ProductRow, Region, Screen, SearchScope, StatusSummary,
    StoreCard, StoreHeader, StoreListArea,
};
pub use text::render_text;

use stockroom_core::{
    format_established, rating_stars, tally_by_status, Form, FormKind, Product, StatusFilter,
    Store, StoreId, ValidationReport,
};

pub(crate) const NO_STORE_TITLE: &str = "Store is not selected";
pub(crate) const STORE_TITLE: &str = "Stores Details";

#[derive(Debug, Default)]
pub struct Presenter {
    screen: Screen,
}

impl Presenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Replace the store list with one card per store.
    pub fn render_stores(&mut self, stores: &[Store]) {
        let cards = stores
            .iter()
            .map(|s| StoreCard {
                id: s.id,
                name: s.name.clone(),
                address: s.address.clone(),
                floor_area: s.floor_area,
            })
            .collect();
        self.screen.store_list = StoreListArea::Cards(cards);
    }

    pub fn highlight_store(&mut self, store_id: Option<StoreId>) {
        self.screen.highlighted_store = store_id;
    }

    /// Placeholder product area shown while no store is selected.
    pub fn show_no_store_selected(&mut self) {
        self.screen.title = NO_STORE_TITLE.to_string();
        self.screen.product_area = ProductArea::NoStoreSelected;
        self.screen.store_header = None;
        self.screen.summary = None;
        self.screen.highlighted_store = None;
        self.hide(Panel::StoreDetails);
        self.hide(Panel::FilterBar);
    }

    pub fn render_product_table(&mut self, products: &[Product]) {
        let rows = products
            .iter()
            .map(|p| ProductRow {
                id: p.id,
                name: p.name.clone(),
                price: p.price,
                specs: p.specs.clone(),
                supplier_info: p.supplier_info.clone(),
                country: p.made_in.clone(),
                company: p.production_company_name.clone(),
                stars: rating_stars(p.rating),
            })
            .collect();
        self.screen.title = STORE_TITLE.to_string();
        self.screen.product_area = ProductArea::Table(rows);
    }

    pub fn render_store_header(&mut self, store: &Store) {
        self.screen.store_header = Some(StoreHeader {
            id: store.id,
            email: store.email.clone(),
            phone_number: store.phone_number.clone(),
            address: store.address.clone(),
            established: format_established(&store.established),
            floor_area: store.floor_area,
        });
        self.show(Panel::StoreDetails);
    }

    /// Status counts for the selected store's full product list. Resets the
    /// filter buttons to `All`.
    pub fn render_status_summary(&mut self, products: &[Product]) {
        self.screen.summary = Some(StatusSummary {
            tally: tally_by_status(products),
            active: StatusFilter::All,
        });
        self.screen.product_search.clear();
        self.show(Panel::FilterBar);
    }

    /// Drop the counts of a previously shown store.
    pub fn clear_status_summary(&mut self) {
        self.screen.summary = None;
        self.hide(Panel::FilterBar);
    }

    pub fn clear_store_header(&mut self) {
        self.screen.store_header = None;
        self.hide(Panel::StoreDetails);
    }

    /// Mark exactly one filter button active. Also clears the product search box.
    pub fn set_active_filter(&mut self, filter: StatusFilter) {
        if let Some(summary) = self.screen.summary.as_mut() {
            summary.active = filter;
        }
        self.screen.product_search.clear();
    }

    pub fn show_loading(&mut self, region: Region) {
        match region {
            Region::StoreList => self.screen.store_list = StoreListArea::Loading,
            Region::ProductArea => self.screen.product_area = ProductArea::Loading,
        }
    }

    pub fn show(&mut self, panel: Panel) {
        self.screen.visible.insert(panel);
    }

    pub fn hide(&mut self, panel: Panel) {
        self.screen.visible.remove(&panel);
    }

    pub fn show_popup(&mut self, message: &str) {
        self.screen.popup = Some(message.to_string());
        self.show(Panel::Popup);
    }

    pub fn hide_popup(&mut self) {
        self.screen.popup = None;
        self.hide(Panel::Popup);
    }

    #[must_use]
    pub fn form(&self, kind: FormKind) -> &Form {
        &self.screen.form(kind).form
    }

    /// Returns `false` if the form has no such field.
    pub fn set_form_field(&mut self, kind: FormKind, field: &str, value: &str) -> bool {
        self.form_view_mut(kind).form.set(field, value)
    }

    /// Apply a validation outcome: flag offending inputs, show the email hint.
    /// A passing report clears previous flags.
    pub fn mark_invalid(&mut self, kind: FormKind, report: &ValidationReport) {
        let view = self.form_view_mut(kind);
        view.invalid.clone_from(&report.invalid);
        view.hint = report.email_hint;
    }

    /// Blank every input, strip error flags and inline messages.
    pub fn clear_form(&mut self, kind: FormKind) {
        let view = self.form_view_mut(kind);
        view.form.clear();
        view.invalid.clear();
        view.hint = None;
    }

    pub fn set_search_text(&mut self, scope: SearchScope, text: &str) {
        *self.search_box_mut(scope) = text.to_string();
    }

    pub fn clear_search(&mut self, scope: SearchScope) {
        self.search_box_mut(scope).clear();
    }

    pub fn show_error(&mut self, message: String) {
        self.screen.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.screen.error = None;
    }

    pub fn render_not_found(&mut self) {
        self.screen.not_found = true;
    }

    fn form_view_mut(&mut self, kind: FormKind) -> &mut FormView {
        match kind {
            FormKind::Store => &mut self.screen.store_form,
            FormKind::Product => &mut self.screen.product_form,
        }
    }

    fn search_box_mut(&mut self, scope: SearchScope) -> &mut String {
        match scope {
            SearchScope::Stores => &mut self.screen.store_search,
            SearchScope::Products => &mut self.screen.product_search,
        }
    }
}
