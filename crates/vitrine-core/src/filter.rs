//! Price filtering and sorting over a derived product list.

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::catalog::Product;
use crate::CoreError;

/// The fixed set of price-filter tokens the storefront select offers.
///
/// Range variants keep products whose price falls inside the interval; the
/// sort variants reorder instead of filtering; [`PriceFilter::All`] is a
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceFilter {
    #[default]
    All,
    /// `0-50`: price <= 50.
    UpTo50,
    /// `50-100`: 50 < price <= 100.
    From50To100,
    /// `100-200`: 100 < price <= 200.
    From100To200,
    /// `200+`: price > 200.
    Above200,
    PriceAsc,
    PriceDesc,
}

impl PriceFilter {
    /// The wire token for this filter, as used by the select control and the
    /// query string.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            PriceFilter::All => "all",
            PriceFilter::UpTo50 => "0-50",
            PriceFilter::From50To100 => "50-100",
            PriceFilter::From100To200 => "100-200",
            PriceFilter::Above200 => "200+",
            PriceFilter::PriceAsc => "price-asc",
            PriceFilter::PriceDesc => "price-desc",
        }
    }
}

impl FromStr for PriceFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PriceFilter::All),
            "0-50" => Ok(PriceFilter::UpTo50),
            "50-100" => Ok(PriceFilter::From50To100),
            "100-200" => Ok(PriceFilter::From100To200),
            "200+" => Ok(PriceFilter::Above200),
            "price-asc" => Ok(PriceFilter::PriceAsc),
            "price-desc" => Ok(PriceFilter::PriceDesc),
            other => Err(CoreError::UnknownPriceFilter(other.to_owned())),
        }
    }
}

/// Parses a catalog price string into a decimal.
///
/// Tolerates currency symbols, whitespace, and pt-BR number formatting:
/// when a comma is present it is the decimal separator and any dots are
/// thousands separators (`"R$ 1.234,56"` → `1234.56`); otherwise the dot is
/// the decimal separator. Returns `None` when nothing numeric remains.
#[must_use]
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else {
        cleaned
    };

    normalized.parse::<Decimal>().ok()
}

/// Applies a price filter to a derived list, returning a new list.
///
/// Range filters drop products without a parseable price. Sort filters are
/// stable, with unparseable prices last in both directions.
#[must_use]
pub fn apply(products: &[Product], filter: PriceFilter) -> Vec<Product> {
    match filter {
        PriceFilter::All => products.to_vec(),
        PriceFilter::UpTo50
        | PriceFilter::From50To100
        | PriceFilter::From100To200
        | PriceFilter::Above200 => products
            .iter()
            .filter(|p| p.numeric_price().is_some_and(|price| in_range(filter, price)))
            .cloned()
            .collect(),
        PriceFilter::PriceAsc | PriceFilter::PriceDesc => {
            let ascending = filter == PriceFilter::PriceAsc;
            let mut sorted = products.to_vec();
            sorted.sort_by(|a, b| {
                compare_prices(a.numeric_price(), b.numeric_price(), ascending)
            });
            sorted
        }
    }
}

fn in_range(filter: PriceFilter, price: Decimal) -> bool {
    let d50 = Decimal::from(50);
    let d100 = Decimal::from(100);
    let d200 = Decimal::from(200);
    match filter {
        PriceFilter::UpTo50 => price <= d50,
        PriceFilter::From50To100 => price > d50 && price <= d100,
        PriceFilter::From100To200 => price > d100 && price <= d200,
        PriceFilter::Above200 => price > d200,
        _ => true,
    }
}

fn compare_prices(a: Option<Decimal>, b: Option<Decimal>, ascending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if ascending {
                a.cmp(&b)
            } else {
                b.cmp(&a)
            }
        }
        // Unparseable prices sort last regardless of direction.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
