use crate::patterns::{
    dangerous_element_regex, dangerous_tag_regex, dangerous_url_attr_regex,
    event_handler_attr_regex, non_text_element_regex, tag_regex,
};

/// Removes all markup and returns the text content.
///
/// `<script>` and `<style>` elements are dropped with their content since
/// it is never rendered as text. Entities are left encoded.
///
/// ```
/// use request_guard::sanitizer::strip_tags;
///
/// assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
/// assert_eq!(strip_tags("a<script>x()</script>b"), "ab");
/// ```
pub fn strip_tags(text: &str) -> String {
    let without_code = non_text_element_regex().replace_all(text, "");
    tag_regex().replace_all(&without_code, "").into_owned()
}

/// Escapes `& < > " ' /` as HTML entities.
///
/// Not idempotent: escaping already-escaped text escapes the `&` again.
///
/// ```
/// use request_guard::sanitizer::escape;
///
/// assert_eq!(escape("<a href='/x'>"), "&lt;a href=&#x27;&#x2F;x&#x27;&gt;");
/// assert_eq!(escape("&amp;"), "&amp;amp;");
/// ```
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(c),
        }
    }
    out
}

/// Removes active content from an HTML fragment while keeping benign markup.
///
/// Dropped: script/style/iframe/object/embed/form/textarea elements with
/// their content, stray link/meta/base tags, inline `on*` handlers, and
/// `href`/`src`/`action` attributes using `javascript:`, `vbscript:` or
/// `data:text/html` URLs. Rules are re-applied until the output stops changing so
/// split payloads such as `<scr<script></script>ipt>` do not reassemble.
///
/// ```
/// use request_guard::sanitizer::sanitize_html;
///
/// let html = r#"<p onclick="steal()">Hi <a href="javascript:x()">there</a></p>"#;
/// assert_eq!(sanitize_html(html), "<p>Hi <a>there</a></p>");
/// ```
pub fn sanitize_html(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = sanitize_html_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn sanitize_html_pass(html: &str) -> String {
    let out = dangerous_element_regex().replace_all(html, "");
    let out = dangerous_tag_regex().replace_all(&out, "");
    let out = event_handler_attr_regex().replace_all(&out, "");
    let out = dangerous_url_attr_regex().replace_all(&out, "");
    out.into_owned()
}

/// Cleans free text typed into a search box.
///
/// Strips markup, drops characters outside word characters, whitespace and
/// `- . _ @`, collapses whitespace runs and truncates to `max_len` characters.
///
/// ```
/// use request_guard::sanitizer::sanitize_search_query;
///
/// assert_eq!(sanitize_search_query("  <b>port</b>  8080; --x ", 100), "port 8080 --x");
/// assert_eq!(sanitize_search_query("abcdef", 3), "abc");
/// ```
pub fn sanitize_search_query(query: &str, max_len: usize) -> String {
    let text = strip_tags(query);
    let kept: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || "-._@".contains(*c))
        .collect();
    let collapsed = kept.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max_len).collect::<String>().trim_end().to_string()
}
