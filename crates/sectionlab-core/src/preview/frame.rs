//! Host container markup for embedding a preview
//!
//! The rendered document goes into the `srcdoc` of a sandboxed frame that
//! may run scripts and open modals but gets no other capability.

use super::RenderedDocument;

/// Sandbox permissions granted to the preview frame
pub const SANDBOX: &str = "allow-scripts allow-modals allow-same-origin";

/// Wrap a rendered document in the host container
///
/// `class` is appended to the container's own classes.
pub fn render_frame(document: &RenderedDocument, class: Option<&str>) -> String {
    let mut classes = String::from("w-full h-full bg-white relative");
    if let Some(class) = class.map(str::trim).filter(|c| !c.is_empty()) {
        classes.push(' ');
        classes.push_str(class);
    }

    format!(
        r#"<div class="{classes}">
  <div class="absolute top-2 left-2 bg-yellow-100 text-yellow-800 text-xs px-2 py-1 rounded z-10 font-mono opacity-50 hover:opacity-100 transition-opacity pointer-events-none">v2 {label}</div>
  <iframe class="w-full h-full border-0" title="Preview" sandbox="{SANDBOX}" srcdoc="{srcdoc}"></iframe>
</div>
"#,
        classes = escape_attribute(&classes),
        label = document.mode.label(),
        srcdoc = escape_attribute(&document.html),
    )
}

/// Escape text for a double-quoted HTML attribute
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
