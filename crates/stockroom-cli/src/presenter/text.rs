use std::fmt::Write as _;

use stockroom_core::{FormKind, Status, StatusFilter};

use super::screen::{FormView, Panel, ProductArea, ProductRow, Screen, StoreListArea};

const FILLED_STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// Draw the screen as plain text for a terminal.
#[must_use]
pub fn render_text(screen: &Screen) -> String {
    let mut out = String::new();
    if screen.not_found {
        out.push_str("404 Not found\n");
        return out;
    }

    render_store_list(&mut out, screen);
    out.push('\n');
    let _ = writeln!(out, "== {} ==", screen.title);
    if let (true, Some(header)) = (
        screen.is_visible(Panel::StoreDetails),
        screen.store_header.as_ref(),
    ) {
        let _ = writeln!(
            out,
            "Email: {}  Phone Number: {}  Address: {}",
            header.email, header.phone_number, header.address
        );
        let _ = writeln!(
            out,
            "Established Date: {}  Floor Area: {}",
            header.established, header.floor_area
        );
    }
    if let (true, Some(summary)) = (screen.is_visible(Panel::FilterBar), screen.summary) {
        let button = |label: &str, count: usize, filter: StatusFilter| {
            if summary.active == filter {
                format!("[*{label} {count}]")
            } else {
                format!("[{label} {count}]")
            }
        };
        let _ = writeln!(
            out,
            "{} {} {} {}",
            button("All", summary.tally.total, StatusFilter::All),
            button("OK", summary.tally.ok, StatusFilter::Only(Status::Ok)),
            button(
                "Storage",
                summary.tally.storage,
                StatusFilter::Only(Status::Storage)
            ),
            button(
                "Out",
                summary.tally.out_of_stock,
                StatusFilter::Only(Status::OutOfStock)
            ),
        );
    }
    if !screen.product_search.is_empty() {
        let _ = writeln!(out, "search: {}", screen.product_search);
    }
    match &screen.product_area {
        ProductArea::NoStoreSelected => {
            out.push_str("The store is not selected\nPlease select the store to proceed\n");
        }
        ProductArea::Loading => out.push_str("loading...\n"),
        ProductArea::Table(rows) => render_table(&mut out, rows),
    }

    for kind in [FormKind::Store, FormKind::Product] {
        if screen.is_visible(Panel::create_modal(kind)) {
            render_form(&mut out, screen.form(kind));
        }
    }
    if screen.is_visible(Panel::ConfirmDeleteStore) {
        out.push_str("\nDelete this store? (confirm / dismiss)\n");
    }
    if screen.is_visible(Panel::ConfirmDeleteProduct) {
        out.push_str("\nDelete this product? (confirm / dismiss)\n");
    }
    if let (true, Some(message)) = (screen.is_visible(Panel::Popup), screen.popup.as_ref()) {
        let _ = writeln!(out, "\n(i) {message}");
    }
    if let Some(error) = &screen.error {
        let _ = writeln!(out, "\nerror: {error}");
    }
    out
}

fn render_store_list(out: &mut String, screen: &Screen) {
    out.push_str("== Stores ==\n");
    if !screen.store_search.is_empty() {
        let _ = writeln!(out, "search: {}", screen.store_search);
    }
    match &screen.store_list {
        StoreListArea::Loading => out.push_str("loading...\n"),
        StoreListArea::Cards(cards) if cards.is_empty() => out.push_str("(no stores)\n"),
        StoreListArea::Cards(cards) => {
            for card in cards {
                let marker = if screen.highlighted_store == Some(card.id) {
                    '>'
                } else {
                    ' '
                };
                let _ = writeln!(
                    out,
                    "{marker} #{:<4} {:<24} {:>8} sq.m  {}",
                    card.id, card.name, card.floor_area, card.address
                );
            }
        }
    }
}

fn render_table(out: &mut String, rows: &[ProductRow]) {
    if rows.is_empty() {
        out.push_str("(no products)\n");
        return;
    }
    let _ = writeln!(
        out,
        "{:<6} {:<20} {:>10} {:<16} {:<16} {:<12} {:<16} {:<5}",
        "Id", "Name", "Price", "Specs", "SupplierInfo", "Country", "Company", "Rating"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<6} {:<20} {:>6} USD {:<16} {:<16} {:<12} {:<16} {:<5}",
            row.id,
            row.name,
            row.price,
            row.specs,
            row.supplier_info,
            row.country,
            row.company,
            stars(row.stars),
        );
    }
}

fn stars(stars: Option<(usize, usize)>) -> String {
    stars.map_or_else(String::new, |(filled, empty)| {
        std::iter::repeat_n(FILLED_STAR, filled)
            .chain(std::iter::repeat_n(EMPTY_STAR, empty))
            .collect()
    })
}

fn render_form(out: &mut String, view: &FormView) {
    let _ = writeln!(out, "\n-- New {} --", view.form.kind());
    for (name, value) in view.form.fields() {
        let flag = if view.invalid.contains(name) { '!' } else { ' ' };
        let _ = writeln!(out, "{flag} {name:<22} {value}");
        if name == "Email" {
            if let Some(hint) = view.hint {
                let _ = writeln!(out, "  {hint}");
            }
        }
    }
    out.push_str("(set <Field> <value>, submit, cancel)\n");
}
