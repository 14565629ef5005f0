//! Product card and grid fragments.

use html_escape::{encode_double_quoted_attribute, encode_text};

use vitrine_core::Product;

use crate::format::{format_price, limit_title};

/// Renders one product card.
///
/// `image_src` is the resolved `src` for the thumbnail — a cached data URL
/// when one exists, the source URL otherwise. The card carries a
/// `data-price` attribute with the parsed numeric price (empty when the
/// price does not parse) so client-side controls can read it without
/// re-parsing display text.
#[must_use]
pub fn render_product_card(product: &Product, image_src: &str) -> String {
    let name_attr = encode_double_quoted_attribute(&product.name);
    let name_text = limit_title(&product.name);
    let data_price = product
        .numeric_price()
        .map(|p| p.to_string())
        .unwrap_or_default();

    let mut card = String::new();
    card.push_str(&format!(
        "<article class=\"produto-card\" role=\"listitem\" data-price=\"{data_price}\">\n"
    ));
    card.push_str("  <div class=\"produto-imagem-wrapper\">\n");
    card.push_str(&format!(
        "    <img src=\"{}\" alt=\"{name_attr}\" class=\"produto-imagem\" loading=\"lazy\" />\n",
        encode_double_quoted_attribute(image_src)
    ));
    if let Some(discount) = product.discount_percent {
        card.push_str(&format!(
            "    <div class=\"desconto-badge\">{discount}% OFF</div>\n"
        ));
    }
    card.push_str("  </div>\n");
    card.push_str("  <div class=\"produto-info\">\n");
    card.push_str(&format!(
        "    <h3 class=\"produto-nome\">{}</h3>\n",
        encode_text(&name_text)
    ));
    card.push_str("    <div class=\"produto-preco-wrapper\">\n");
    if let Some(old_price) = &product.old_price {
        card.push_str(&format!(
            "      <div class=\"produto-preco-original\">R$ {}</div>\n",
            encode_text(&format_price(old_price))
        ));
    }
    card.push_str(&format!(
        "      <div class=\"produto-preco-atual\">R$ {}</div>\n",
        encode_text(&format_price(&product.price))
    ));
    card.push_str("    </div>\n");
    card.push_str(&format!(
        "    <button class=\"produto-botao\" data-produto-id=\"{}\">Comprar</button>\n",
        encode_double_quoted_attribute(&product.id)
    ));
    card.push_str("  </div>\n");
    card.push_str("</article>\n");
    card
}

/// Renders a grid of product cards. `resolve_src` maps a product to the
/// `src` its card should use (the image cache hook).
#[must_use]
pub fn render_product_grid<F>(products: &[Product], resolve_src: F) -> String
where
    F: Fn(&Product) -> String,
{
    let mut grid = String::from("<div class=\"produtos-grid\" role=\"list\">\n");
    for product in products {
        grid.push_str(&render_product_card(product, &resolve_src(product)));
    }
    grid.push_str("</div>\n");
    grid
}

/// The placeholder for a search that matched nothing. Distinct from
/// [`render_load_error`]: the catalog loaded fine, the query just has no
/// results.
#[must_use]
pub fn render_no_results() -> String {
    concat!(
        "<div class=\"sem-resultados\">\n",
        "  <p class=\"sem-resultados-texto\">",
        "Ops, nenhum resultado foi encontrado para sua pesquisa.",
        "</p>\n",
        "  <img src=\"./assets/images/avatars/searchnotfound.png\" ",
        "alt=\"Nenhum resultado encontrado\" class=\"imagem-sem-resultados\" />\n",
        "</div>\n"
    )
    .to_owned()
}

/// The static error message shown when the catalog document cannot be
/// loaded or parsed.
#[must_use]
pub fn render_load_error() -> String {
    concat!(
        "<div class=\"produtos-erro\">\n",
        "  <p>Não foi possível carregar os produtos. Tente novamente mais tarde.</p>\n",
        "</div>\n"
    )
    .to_owned()
}
