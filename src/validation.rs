use crate::error::{Error, Result};

pub const USAGE_HINT: &str = "Usage: /api/oracle?ticker=FET or /api/oracle?ticker=0x...";

/// Cleans a raw `ticker` value: surrounding whitespace and a leading `$` are
/// dropped. Anything else is free text for the resolver. Case is preserved
/// since Solana addresses are case-sensitive.
pub fn normalize_ticker_input(raw: &str) -> Result<String> {
    let input = raw.trim();
    let input = input.strip_prefix('$').unwrap_or(input).trim();

    if input.is_empty() {
        return Err(Error::InvalidInput("Missing ticker parameter.".to_string()));
    }
    Ok(input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ticker_input() -> Result<()> {
        assert_eq!(normalize_ticker_input("  $fet ")?, "fet");
        assert_eq!(normalize_ticker_input("$ BTC")?, "BTC");
        assert_eq!(
            normalize_ticker_input("DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263")?,
            "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263"
        );
        assert_eq!(normalize_ticker_input(" shiba inu ")?, "shiba inu");
        assert_eq!(normalize_ticker_input("BTC<script>")?, "BTC<script>");
        Ok(())
    }

    #[test]
    fn test_rejects_missing_input() {
        assert!(matches!(normalize_ticker_input(""), Err(Error::InvalidInput(_))));
        assert!(matches!(normalize_ticker_input("   "), Err(Error::InvalidInput(_))));
        assert!(matches!(normalize_ticker_input("  $ "), Err(Error::InvalidInput(_))));
    }
}
