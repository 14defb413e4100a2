use stockroom_core::{ProductId, StatusFilter, StoreId};

/// Transient UI state owned by the [`super::Coordinator`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub selected_store: Option<StoreId>,
    /// Product awaiting delete confirmation.
    pub selected_product: Option<ProductId>,
    /// Direction of the next sort. Shared by every column.
    pub sort_descending: bool,
    /// Set when the last form submission was blocked by validation.
    pub pending_validation_error: bool,
    pub store_search_text: String,
    pub product_search_text: String,
    pub active_filter: StatusFilter,
    store_epoch: u64,
    product_epoch: u64,
    popup_epoch: u64,
}

impl UiState {
    /// Start a new store-list request; older in-flight ones become stale.
    pub(crate) fn next_store_epoch(&mut self) -> u64 {
        self.store_epoch += 1;
        self.store_epoch
    }

    /// Start a new product-area request; older in-flight ones become stale.
    pub(crate) fn next_product_epoch(&mut self) -> u64 {
        self.product_epoch += 1;
        self.product_epoch
    }

    pub(crate) fn next_popup_epoch(&mut self) -> u64 {
        self.popup_epoch += 1;
        self.popup_epoch
    }

    pub(crate) fn is_current_store_request(&self, epoch: u64) -> bool {
        epoch == self.store_epoch
    }

    pub(crate) fn is_current_product_request(&self, epoch: u64, store_id: StoreId) -> bool {
        epoch == self.product_epoch && self.selected_store == Some(store_id)
    }

    pub(crate) fn is_current_popup(&self, epoch: u64) -> bool {
        epoch == self.popup_epoch
    }

    /// Back to "no store selected".
    pub(crate) fn deselect_store(&mut self) {
        self.selected_store = None;
        self.selected_product = None;
        self.product_search_text.clear();
        self.active_filter = StatusFilter::All;
    }
}
