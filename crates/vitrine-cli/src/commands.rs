//! CLI subcommand implementations: the same pipeline the search page runs,
//! printed as plain text.

use vitrine_catalog::{CatalogClient, ImageCache};
use vitrine_core::matcher::{self, MatchMode};
use vitrine_core::{filter, ordering, paginate, AppConfig, PriceFilter, Product, SearchState};
use vitrine_render::format_price;

fn catalog_client(config: &AppConfig) -> anyhow::Result<CatalogClient> {
    Ok(CatalogClient::new(
        &config.catalog_base_url,
        config.http_timeout_secs,
        &config.user_agent,
    )?)
}

pub async fn run_search(
    config: &AppConfig,
    query: &str,
    price: PriceFilter,
    category: bool,
    promo: bool,
    page: usize,
) -> anyhow::Result<()> {
    let client = catalog_client(config)?;
    let mut products = client.fetch_products().await?;
    tracing::debug!(total = products.len(), "catalog loaded");

    let mut state = SearchState::new(config.page_size);
    if promo {
        state.toggle_promotions(true);
    }
    state.select_price_filter(price);
    state.submit_query(query);
    state.go_to_page(page);

    ordering::shuffle(&mut products);
    if state.promo_first {
        ordering::promos_first(&mut products);
    }

    let mode = if category {
        MatchMode::Category
    } else {
        MatchMode::Name
    };
    let matches = matcher::search(&products, &state.query, mode);
    let filtered = filter::apply(&matches, state.price_filter);

    if filtered.is_empty() {
        println!("Nenhum resultado encontrado.");
        return Ok(());
    }

    let served = paginate(&filtered, state.page, state.page_size);
    for product in &served.items {
        println!("{}", product_line(product));
    }
    println!(
        "página {} de {} ({} resultados)",
        served.page,
        served.total_pages,
        filtered.len()
    );
    Ok(())
}

pub async fn run_categories(config: &AppConfig) -> anyhow::Result<()> {
    let client = catalog_client(config)?;
    let categories = client.fetch_categories().await?;

    if categories.is_empty() {
        println!("Nenhuma categoria cadastrada.");
        return Ok(());
    }

    for category in &categories {
        match &category.description {
            Some(description) => println!("{}: {description}", category.name),
            None => println!("{}", category.name),
        }
    }
    Ok(())
}

pub async fn run_featured(config: &AppConfig) -> anyhow::Result<()> {
    let client = catalog_client(config)?;
    let mut products = client.fetch_products().await?;
    products.retain(|p| p.is_featured);

    if products.is_empty() {
        println!("Nenhum produto em destaque.");
        return Ok(());
    }

    for product in &products {
        println!("{}", product_line(product));
    }
    Ok(())
}

pub async fn run_images_warm(config: &AppConfig) -> anyhow::Result<()> {
    let client = catalog_client(config)?;
    let images = ImageCache::open(&config.image_cache_path, config.image_ttl_secs)?;

    let featured: Vec<Product> = client
        .fetch_products()
        .await?
        .into_iter()
        .filter(|p| p.is_featured)
        .collect();

    let stats = images
        .ensure_for_page(client.http(), &featured, config.image_fetch_concurrency)
        .await;
    println!(
        "imagens: {} baixadas, {} com falha, {} já em cache",
        stats.fetched, stats.failed, stats.skipped
    );
    Ok(())
}

pub fn run_images_prune(config: &AppConfig) -> anyhow::Result<()> {
    let images = ImageCache::open(&config.image_cache_path, config.image_ttl_secs)?;
    let removed = images.prune_expired()?;
    println!("imagens: {removed} entradas expiradas removidas");
    Ok(())
}

fn product_line(product: &Product) -> String {
    let mut line = format!("{}  R$ {}", product.name, format_price(&product.price));
    if let Some(old_price) = &product.old_price {
        line.push_str(&format!("  (de R$ {})", format_price(old_price)));
    }
    if let Some(discount) = product.discount_percent {
        line.push_str(&format!("  {discount}% OFF"));
    }
    if product.is_featured {
        line.push_str("  [destaque]");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(name: &str, price: &str) -> Product {
        Product {
            id: "1".to_string(),
            name: name.to_string(),
            price: price.to_string(),
            old_price: None,
            discount_percent: None,
            image_url: String::new(),
            category_names: Vec::new(),
            is_featured: false,
            is_promotional: false,
        }
    }

    #[test]
    fn product_line_formats_price() {
        let line = product_line(&make_product("Vestido Azul", "50,00"));
        assert_eq!(line, "Vestido Azul  R$ 50,00");
    }

    #[test]
    fn product_line_includes_discount_details() {
        let mut product = make_product("Vestido Verde", "150");
        product.old_price = Some("214,90".to_string());
        product.discount_percent = Some(30);
        product.is_featured = true;
        let line = product_line(&product);
        assert_eq!(
            line,
            "Vestido Verde  R$ 150,00  (de R$ 214,90)  30% OFF  [destaque]"
        );
    }
}
