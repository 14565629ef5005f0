//! Category grid and per-category product sections.

use html_escape::{encode_double_quoted_attribute, encode_text};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use vitrine_core::{Category, Product};

use crate::product_card::render_product_card;

/// Builds the search link a category card points at: category-mode search
/// for the category name, percent-encoded.
#[must_use]
pub fn category_search_href(name: &str) -> String {
    format!(
        "search.html?q={}&categoria=1",
        utf8_percent_encode(name.trim(), NON_ALPHANUMERIC)
    )
}

/// Renders the category grid: one linked card per category.
#[must_use]
pub fn render_category_grid(categories: &[Category]) -> String {
    let mut grid = String::from("<div class=\"categorias-grid\">\n");
    for category in categories {
        let name = category.name.trim();
        grid.push_str(&format!(
            concat!(
                "  <a class=\"categoria-card\" role=\"button\" href=\"{href}\" ",
                "aria-label=\"{label}\">\n",
                "    <div class=\"categoria-nome\">{name}</div>\n",
                "  </a>\n"
            ),
            href = encode_double_quoted_attribute(&category_search_href(name)),
            label = encode_double_quoted_attribute(name),
            name = encode_text(name),
        ));
    }
    grid.push_str("</div>\n");
    grid
}

/// Renders products grouped into one section per category. Categories with
/// no products are skipped entirely. `resolve_src` maps a product to its
/// card image `src`.
#[must_use]
pub fn render_category_sections<F>(
    categories: &[Category],
    products: &[Product],
    resolve_src: F,
) -> String
where
    F: Fn(&Product) -> String,
{
    let mut sections = String::new();
    for category in categories {
        let members: Vec<&Product> = products
            .iter()
            .filter(|p| p.in_category(&category.name))
            .collect();
        if members.is_empty() {
            continue;
        }

        sections.push_str(&format!(
            "<section class=\"categoria-section\" id=\"categoria-{}\">\n",
            encode_double_quoted_attribute(&section_slug(category))
        ));
        sections.push_str(&format!(
            "  <h2>{}</h2>\n",
            encode_text(category.name.trim())
        ));
        if let Some(description) = &category.description {
            sections.push_str(&format!("  <p>{}</p>\n", encode_text(description)));
        }
        sections.push_str("  <div class=\"produtos-categoria-list\">\n");
        for product in members {
            sections.push_str(&render_product_card(product, &resolve_src(product)));
        }
        sections.push_str("  </div>\n");
        sections.push_str("</section>\n");
    }
    sections
}

/// The static error message shown when the category document cannot be
/// loaded or parsed.
#[must_use]
pub fn render_categories_error() -> String {
    concat!(
        "<div class=\"categorias-erro\">\n",
        "  <p>Erro ao carregar categorias. Tente novamente mais tarde.</p>\n",
        "</div>\n"
    )
    .to_owned()
}

/// Section anchor id: the category id when present, else the name with
/// whitespace collapsed to dashes.
fn section_slug(category: &Category) -> String {
    category.id.clone().unwrap_or_else(|| {
        category
            .name
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_category(name: &str, description: Option<&str>) -> Category {
        Category {
            id: None,
            name: name.to_string(),
            description: description.map(ToOwned::to_owned),
        }
    }

    fn make_product(name: &str, category: &str) -> Product {
        Product {
            id: "1".to_string(),
            name: name.to_string(),
            price: "100".to_string(),
            old_price: None,
            discount_percent: None,
            image_url: String::new(),
            category_names: vec![category.to_string()],
            is_featured: false,
            is_promotional: false,
        }
    }

    #[test]
    fn href_percent_encodes_the_name_and_sets_category_mode() {
        assert_eq!(
            category_search_href("Moda Festa"),
            "search.html?q=Moda%20Festa&categoria=1"
        );
    }

    #[test]
    fn href_trims_surrounding_whitespace() {
        assert_eq!(
            category_search_href(" Vestidos "),
            "search.html?q=Vestidos&categoria=1"
        );
    }

    #[test]
    fn grid_renders_one_card_per_category() {
        let categories = vec![
            make_category("Vestidos", None),
            make_category("Saias", None),
        ];
        let grid = render_category_grid(&categories);
        assert_eq!(grid.matches("categoria-card").count(), 2);
        assert!(grid.contains("search.html?q=Vestidos&amp;categoria=1"));
    }

    #[test]
    fn sections_skip_categories_without_products() {
        let categories = vec![
            make_category("Vestidos", Some("Peças leves")),
            make_category("Acessórios", None),
        ];
        let products = vec![make_product("Vestido Azul", "Vestidos")];
        let html = render_category_sections(&categories, &products, |p| p.image_url.clone());

        assert_eq!(html.matches("categoria-section").count(), 1);
        assert!(html.contains("<h2>Vestidos</h2>"));
        assert!(html.contains("Peças leves"));
        assert!(!html.contains("Acessórios"));
    }

    #[test]
    fn section_membership_is_case_insensitive() {
        let categories = vec![make_category("vestidos", None)];
        let products = vec![make_product("Vestido Azul", "Vestidos")];
        let html = render_category_sections(&categories, &products, |p| p.image_url.clone());
        assert!(html.contains("produto-card"));
    }

    #[test]
    fn section_slug_prefers_id_and_falls_back_to_dashed_name() {
        let with_id = Category {
            id: Some("7".to_string()),
            name: "Moda Festa".to_string(),
            description: None,
        };
        assert_eq!(section_slug(&with_id), "7");
        assert_eq!(section_slug(&make_category("Moda Festa", None)), "moda-festa");
    }
}
