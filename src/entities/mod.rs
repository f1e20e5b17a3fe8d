//! Storefront entities: products and artisans

pub mod artisan;
#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod product;

pub use artisan::{Artisan, ArtisanProfileRow, ArtisanRow};
pub use product::{ArtisanRef, NewProduct, Product};

/// Default storefront currency
pub const DEFAULT_CURRENCY: &str = "MGA";

/// Format an amount for display: `MGA 85 000`.
///
/// The amount is floored, thousands are grouped with spaces, and a negative
/// sign follows the currency code.
pub fn format_price(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let digits = (amount.abs().floor() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    format!("{} {}{}", currency, sign, grouped)
}
