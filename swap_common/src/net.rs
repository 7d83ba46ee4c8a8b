//! Endpoints of the external collaborators: the price feed and token icons.

/// Default JSON price feed returning `{currency|symbol, price}` rows.
pub const PRICES_URL: &str = "https://interview.switcheo.com/prices.json";
/// Base URL of the token icon set; icons live at `{base}{SYMBOL}.svg`.
pub const ICON_BASE: &str = "https://raw.githubusercontent.com/Switcheo/token-icons/main/tokens/";

/// Build the icon URL for an uppercase symbol. The URL is not checked for existence.
pub fn icon_url(base: &str, symbol: &str) -> String {
    format!("{}{}.svg", base, urlencoding::encode(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url_encodes_symbol() {
        assert_eq!(icon_url("https://x/", "ETH"), "https://x/ETH.svg");
        assert_eq!(icon_url("https://x/", "A B"), "https://x/A%20B.svg");
    }
}
