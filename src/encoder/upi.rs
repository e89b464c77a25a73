//! UPI payment deep links.
//!
//! ```text
//! upi://pay?pa=<payee VPA>[&am=<amount>][&pn=<payee name>]&cu=INR
//! ```

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Build a UPI pay link. `payee` and `name` are percent-encoded; the amount
/// is inserted as given. Empty optional parts are omitted.
///
/// ```
/// use setu::encoder::upi::pay_link;
///
/// assert_eq!(
///     pay_link("shop@upi", Some("149.00"), Some("Chai Point")),
///     "upi://pay?pa=shop%40upi&am=149.00&pn=Chai%20Point&cu=INR",
/// );
/// assert_eq!(pay_link("a@b", None, None), "upi://pay?pa=a%40b&cu=INR");
/// ```
pub fn pay_link(payee: &str, amount: Option<&str>, name: Option<&str>) -> String {
    let mut link = format!("upi://pay?pa={}", encode_component(payee));

    if let Some(amount) = amount.filter(|a| !a.is_empty()) {
        link.push_str("&am=");
        link.push_str(amount);
    }
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        link.push_str("&pn=");
        link.push_str(&encode_component(name));
    }

    link.push_str("&cu=INR");
    link
}

/// Everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, the URI-component
/// unreserved set.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component. Non-ASCII is encoded per UTF-8 byte.
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}
