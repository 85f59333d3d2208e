//! Product attributes embedded in rendered page markup.
//!
//! Product cards expose their data as attributes on the card element:
//!
//! ```html
//! <article data-product-id="101" data-title="Pineapple Soap"
//!          data-price="$1,099" data-url="/products/soap" data-variant-id="44012">
//!   <img src="/img/soap.jpg" alt="">
//! </article>
//! ```
//!
//! `href` stands in for a missing `data-url`. The image is the `src` of the
//! first `<img>` nested inside the card. A card whose closing tag is missing
//! extends to the next card (or the end of the document); void and
//! self-closing cards have no body.

use std::sync::LazyLock;

use regex::Regex;

use super::ProductElement;

/// Opening tags carrying a `data-product-id` attribute. Quoted values may
/// contain `>`.
static PRODUCT_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<([a-z][a-z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*?\sdata-product-id\s*=\s*(?:"[^"]*"|'[^']*')(?:[^>"']|"[^"]*"|'[^']*')*)>"#,
    )
    .expect("Invalid regex")
});

/// Any opening or closing tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<(/?)([a-z][a-z0-9-]*)(?:[^>"']|"[^"]*"|'[^']*')*>"#)
        .expect("Invalid regex")
});

/// Elements that never have content.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// `name="value"` or `name='value'` attribute pairs.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)([a-z_:][a-z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid regex")
});

/// `<img>` tags.
static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b([^>]*)>").expect("Invalid regex"));

/// Scan markup for product elements, in document order.
#[must_use]
pub fn scan_markup(html: &str) -> Vec<ProductElement> {
    let tags: Vec<_> = PRODUCT_TAG_RE.captures_iter(html).collect();

    tags.iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let name = caps.get(1).map_or("", |m| m.as_str());
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            let next_card = tags
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(html.len(), |m| m.start());

            let body_end = if whole.as_str().ends_with("/>")
                || VOID_ELEMENTS.iter().any(|void| void.eq_ignore_ascii_case(name))
            {
                whole.end()
            } else {
                closing_tag_start(html, whole.end(), name)
                    .map_or(next_card, |end| end.min(next_card))
            };
            let body = html.get(whole.end()..body_end).unwrap_or("");
            Some(element_from(attrs, body))
        })
        .collect()
}

/// Byte offset of the tag closing the `name` element opened just before
/// `from`, accounting for nested elements of the same name.
fn closing_tag_start(html: &str, from: usize, name: &str) -> Option<usize> {
    let rest = html.get(from..)?;
    let mut depth = 1_usize;

    for caps in TAG_RE.captures_iter(rest) {
        let (Some(tag), Some(tag_name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        if !tag_name.as_str().eq_ignore_ascii_case(name) {
            continue;
        }

        let closing = caps.get(1).is_some_and(|slash| !slash.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some(from + tag.start());
            }
        } else if !tag.as_str().ends_with("/>") {
            depth += 1;
        }
    }

    None
}

fn element_from(attrs: &str, body: &str) -> ProductElement {
    let mut element = ProductElement::default();
    let mut href = None;

    for (name, value) in attributes(attrs) {
        match name.as_str() {
            "data-product-id" => element.id = Some(value),
            "data-title" => element.title = Some(value),
            "data-price" => element.price = Some(value),
            "data-url" => element.url = Some(value),
            "data-variant-id" => element.variant_ref = Some(value),
            "href" => href = Some(value),
            _ => {}
        }
    }

    if element.url.is_none() {
        element.url = href;
    }

    element.image = IMG_TAG_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|img| {
            attributes(img.as_str())
                .into_iter()
                .find(|(name, _)| name == "src")
                .map(|(_, src)| src)
        });

    element
}

/// Attribute pairs with lowercased names and decoded values.
fn attributes(attrs: &str) -> Vec<(String, String)> {
    ATTR_RE
        .captures_iter(attrs)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            Some((name, decode_entities(value)))
        })
        .collect()
}

fn decode_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
