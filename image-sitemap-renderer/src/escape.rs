//! XML text escaping used as the Tera autoescape function.
//!
//! Tera's built-in HTML escaper also rewrites `/` as `&#x2F;`, which would
//! mangle every URL in the sitemap. This escaper only touches the five XML
//! special characters and drops code points XML 1.0 cannot carry.

use image_sitemap_core::is_xml_char;

/// Escape `input` for use as XML character data or an attribute value.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}
