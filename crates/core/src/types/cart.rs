//! Typed cart and its cookie encoding.
//!
//! The browser keeps the cart as a single cookie whose value is a
//! comma-separated list of product identifiers. An identifier's repetition
//! count is its quantity:
//!
//! ```text
//! cart=1,2,1      ->  product 1 x2, product 2 x1
//! ```
//!
//! Browser cookie libraries percent-encode the value, so the same cart usually
//! arrives as `1%2C2%2C1`. [`Cart::from_cookie_value`] and
//! [`Cart::to_cookie_value`] are the only places that know about this
//! encoding; everything else works with [`Cart`].

use std::collections::HashSet;

use rust_decimal::Decimal;

use super::id::ProductId;
use super::price::Price;
use super::product::Product;

/// Name of the cookie holding the cart.
pub const CART_COOKIE_NAME: &str = "cart";

/// Percent-encoded form of [`ProductId::SEPARATOR`].
const ENCODED_SEPARATOR: &str = "%2C";

/// An ordered sequence of product identifiers, one entry per unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    ids: Vec<ProductId>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Parse a cart from a raw cookie value.
    ///
    /// Never fails: the value is percent-decoded if it can be, blank segments
    /// are skipped, and each identifier is trimmed.
    #[must_use]
    pub fn from_cookie_value(raw: &str) -> Self {
        let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_owned(), |d| d.into_owned());

        let ids = decoded
            .split(ProductId::SEPARATOR)
            .filter_map(|segment| ProductId::parse(segment).ok())
            .collect();

        Self { ids }
    }

    /// Encode the cart as a cookie value (`1%2C2%2C1`).
    #[must_use]
    pub fn to_cookie_value(&self) -> String {
        self.ids
            .iter()
            .map(|id| urlencoding::encode(id.as_str()))
            .collect::<Vec<_>>()
            .join(ENCODED_SEPARATOR)
    }

    /// Add one unit of a product.
    pub fn push(&mut self, id: ProductId) {
        self.ids.push(id);
    }

    /// All entries in stored order, repeats included.
    #[must_use]
    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    /// Returns `true` if the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Total number of units across all products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Distinct identifiers in first-seen order.
    #[must_use]
    pub fn distinct_ids(&self) -> Vec<ProductId> {
        let mut seen = HashSet::with_capacity(self.ids.len());
        self.ids
            .iter()
            .filter(|id| seen.insert(*id))
            .cloned()
            .collect()
    }

    /// Number of occurrences of `id` in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: &ProductId) -> u32 {
        let count = self.ids.iter().filter(|entry| *entry == id).count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}

impl FromIterator<ProductId> for Cart {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// A product in the cart with its aggregated quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// `cost × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.cost * Decimal::from(self.quantity)
    }
}

/// Rendered cart contents: one line per distinct product.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
}

impl CartSummary {
    /// Attach quantities from `cart` to fetched products.
    ///
    /// `fetched` pairs each requested identifier with the product returned
    /// for it. Quantity is counted against the requested identifier, so a
    /// catalog that echoes ids in a different format still aggregates
    /// correctly.
    #[must_use]
    pub fn assemble<I>(cart: &Cart, fetched: I) -> Self
    where
        I: IntoIterator<Item = (ProductId, Product)>,
    {
        let lines = fetched
            .into_iter()
            .map(|(id, product)| CartLine {
                quantity: cart.quantity_of(&id),
                product,
            })
            .collect();

        Self { lines }
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal as a displayable price.
    #[must_use]
    pub fn subtotal_price(&self) -> Price {
        Price::usd(self.subtotal())
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Returns `true` if there are no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
