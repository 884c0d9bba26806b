//! HTML helper functions

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("https://images.example.com/hero.png", Some("Hero"))
/// ```
pub fn image_tag(src: &str, alt: Option<&str>) -> String {
    format!(
        r#"<img src="{}" alt="{}">"#,
        html_escape(src),
        html_escape(alt.unwrap_or(""))
    )
}

/// Generate a `<meta>` tag; `attr` is `name` or `property`
pub fn meta_tag(attr: &str, key: &str, content: &str) -> String {
    format!(
        r#"<meta {}="{}" content="{}">"#,
        attr,
        html_escape(key),
        html_escape(content)
    )
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    meta_tag(
        "name",
        "generator",
        &format!("folio {}", env!("CARGO_PKG_VERSION")),
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
