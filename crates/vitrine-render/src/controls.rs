//! Pagination and promo-toggle control fragments.

use vitrine_core::Page;

/// Renders the pagination controls for a served page: previous/next buttons
/// with `disabled` at the boundaries and the `X de Y` position text.
#[must_use]
pub fn render_pagination<T>(page: &Page<T>) -> String {
    let prev_disabled = if page.has_prev() { "" } else { " disabled" };
    let next_disabled = if page.has_next() { "" } else { " disabled" };
    format!(
        concat!(
            "<nav class=\"paginacao\" aria-label=\"Paginação\">\n",
            "  <button id=\"prevPage\"{prev}>Anterior</button>\n",
            "  <span id=\"paginationInfo\">{page} de {total}</span>\n",
            "  <button id=\"nextPage\"{next}>Próxima</button>\n",
            "</nav>\n"
        ),
        prev = prev_disabled,
        next = next_disabled,
        page = page.page,
        total = page.total_pages,
    )
}

/// Renders the promotions toggle. When the current result list is empty the
/// toggle is disabled and unchecked so it cannot reorder nothing.
#[must_use]
pub fn render_promo_toggle(enabled: bool, checked: bool) -> String {
    let disabled_attr = if enabled { "" } else { " disabled" };
    let checked_attr = if enabled && checked { " checked" } else { "" };
    let label_class = if enabled {
        "promo-toggle-label"
    } else {
        "promo-toggle-label promo-toggle-disabled"
    };
    format!(
        concat!(
            "<label class=\"{class}\">\n",
            "  <input type=\"checkbox\" id=\"promoToggle\"{checked}{disabled} />\n",
            "  Promoções primeiro\n",
            "</label>\n"
        ),
        class = label_class,
        checked = checked_attr,
        disabled = disabled_attr,
    )
}
