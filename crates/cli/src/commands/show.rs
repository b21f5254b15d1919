//! `cartkit show` - print a normalized cart.

use std::io::Write;

use cartkit::{CartConfig, CartState, RawCart};

use super::CommandError;

/// Normalize `raw` and write its view model as pretty JSON.
pub fn run(raw: &RawCart, config: &CartConfig, out: &mut impl Write) -> Result<(), CommandError> {
    let state = CartState::normalize(raw, config)?;
    serde_json::to_writer_pretty(&mut *out, &state)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cartkit::RawLineItem;

    use super::*;

    #[test]
    fn test_show_writes_state_json() {
        let raw = RawCart::new(vec![RawLineItem::new("A", 2, "Shirt", "vA", "10")], "20");
        let mut out = Vec::new();
        run(&raw, &CartConfig::default(), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_quantity"], 2);
        assert_eq!(value["items"]["A"]["product_total_price"], 20);
    }

    #[test]
    fn test_show_rejects_invalid_cart() {
        let raw = RawCart::new(vec![RawLineItem::new("A", 2, "Shirt", "vA", "ten")], "20");
        let mut out = Vec::new();
        assert!(matches!(
            run(&raw, &CartConfig::default(), &mut out),
            Err(CommandError::Cart(_))
        ));
        assert!(out.is_empty());
    }
}
