//! Standalone document assembly
//!
//! Each mode wraps its content in a complete HTML document meant for a
//! sandboxed frame. In markup documents the user CSS and script sit in
//! their own attribute-less `<style>`/`<script>` tags, so extracting
//! segments from the document yields them back unchanged.

use crate::config::CdnConfig;

/// Base styles shared by markup and component documents
const BASE_STYLE: &str = "body { margin: 0; padding: 0; font-family: sans-serif; }
      ::-webkit-scrollbar { width: 0px; background: transparent; }";

/// Logs script failures instead of letting them escape the preview
const ERROR_GUARD: &str = "window.addEventListener('error', function (e) {
        console.log('Preview JS Error', e.error || e.message);
        e.preventDefault();
      });";

/// Keeps link clicks from navigating the frame away
const NAVIGATION_GUARD: &str = "document.addEventListener('click', function (e) {
        if (e.target.closest && e.target.closest('a')) e.preventDefault();
      });";

/// Renders any icon-library component as a placeholder box
const ICON_SHIM: &str = "const LucideIcons = new Proxy({}, {
          get: (target, prop) => (props) => {
            return <span style={{display: 'inline-block', border: '1px solid currentColor', width: 24, height: 24, borderRadius: 4, textAlign: 'center'}}>i</span>
          }
        });";

/// Component mounted when the snippet names none
const DEFAULT_COMPONENT: &str = "App";

/// Document for resolved markup with its CSS and script
pub(crate) fn markup_document(markup: &str, css: &str, script: &str, cdn: &CdnConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <script src="{tailwind}"></script>
    <style data-preview="base">
      {BASE_STYLE}
    </style>
    <style>{css}</style>
  </head>
  <body>
{markup}
    <script data-preview="guard">
      {ERROR_GUARD}
    </script>
    <script>{script}</script>
    <script data-preview="navigation">
      {NAVIGATION_GUARD}
    </script>
  </body>
</html>
"#,
        tailwind = cdn.tailwind,
    )
}

/// Document applying a bare stylesheet to a fixed demo skeleton
pub(crate) fn style_document(css: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <style>
      body {{ margin: 0; padding: 20px; font-family: sans-serif; }}
      {css}
    </style>
  </head>
  <body>
    <div class="demo-box">
      <h1>CSS Preview</h1>
      <p>Content to demonstrate styles.</p>
      <button>Button</button>
      <div class="card">Card Element</div>
    </div>
  </body>
</html>
"#
    )
}

/// Document mounting a component function with an in-browser transform
pub(crate) fn component_document(source: &str, cdn: &CdnConfig) -> String {
    let code = strip_imports(source);
    let (code, component) = rewrite_default_export(&code);

    format!(
        r#"<!DOCTYPE html>
<html>
  <head>
    <script src="{react}" crossorigin></script>
    <script src="{react_dom}" crossorigin></script>
    <script src="{babel}"></script>
    <script src="{tailwind}"></script>
    <style>
      {BASE_STYLE}
    </style>
  </head>
  <body>
    <div id="root"></div>
    <script type="text/babel">
        {ICON_SHIM}

{code}

        const root = ReactDOM.createRoot(document.getElementById('root'));
        try {{
          root.render(<{component} />);
        }} catch (e) {{
          document.body.innerHTML = '<div style="color:red; padding:20px;">Runtime Error: ' + e.message + '</div>';
        }}
    </script>
  </body>
</html>
"#,
        react = cdn.react,
        react_dom = cdn.react_dom,
        babel = cdn.babel,
        tailwind = cdn.tailwind,
    )
}

/// Remove single-line `import ... from ...;` statements
pub(crate) fn strip_imports(code: &str) -> String {
    code.split_inclusive('\n')
        .map(strip_line_imports)
        .collect()
}

fn strip_line_imports(line: &str) -> String {
    let mut output = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find("import") {
        let after = &rest[start..];
        let statement_end = after
            .find("from")
            .and_then(|from| after[from..].find(';').map(|semi| from + semi + 1));

        match statement_end {
            Some(end) => {
                output.push_str(&rest[..start]);
                rest = &after[end..];
            }
            None => break,
        }
    }

    output.push_str(rest);
    output
}

/// Rewrite the first default-exported function into a plain declaration
///
/// Returns the rewritten code and the component name to mount.
/// `export default function Name` becomes `function Name`; an anonymous
/// default function is named `App`; `export default Name;` is dropped and
/// `Name` mounted.
pub(crate) fn rewrite_default_export(code: &str) -> (String, String) {
    let Some((start, after_default)) = find_export_default(code) else {
        return (code.to_string(), DEFAULT_COMPONENT.to_string());
    };

    let rest = &code[after_default..];
    let trimmed = rest.trim_start();
    let gap = rest.len() - trimmed.len();

    if let Some(after_function) = trimmed.strip_prefix("function")
        && !after_function.starts_with(is_ident_char)
    {
        let name = leading_ident(after_function.trim_start());
        let (declaration, component) = match name {
            Some(name) => ("function", name.to_string()),
            None => ("function App", DEFAULT_COMPONENT.to_string()),
        };
        let body_start = after_default + gap + "function".len();
        let code = format!("{}{}{}", &code[..start], declaration, &code[body_start..]);
        return (code, component);
    }

    if let Some(name) = leading_ident(trimmed) {
        let statement_end = after_default + gap + name.len();
        let tail = code[statement_end..]
            .strip_prefix(';')
            .unwrap_or(&code[statement_end..]);
        let code = format!("{}{}", &code[..start], tail);
        return (code, name.to_string());
    }

    (code.to_string(), DEFAULT_COMPONENT.to_string())
}

/// Locate `export <ws> default`, returning (start, end) byte positions
fn find_export_default(code: &str) -> Option<(usize, usize)> {
    let mut from = 0;
    while let Some(offset) = code[from..].find("export") {
        let start = from + offset;
        let after_export = start + "export".len();
        let rest = &code[after_export..];
        let trimmed = rest.trim_start();
        if trimmed.len() < rest.len()
            && let Some(after_default) = trimmed.strip_prefix("default")
            && !after_default.starts_with(is_ident_char)
        {
            let end = code.len() - after_default.len();
            return Some((start, end));
        }
        from = after_export;
    }
    None
}

fn leading_ident(text: &str) -> Option<&str> {
    let end = text.find(|c: char| !is_ident_char(c)).unwrap_or(text.len());
    let ident = &text[..end];
    (!ident.is_empty() && !ident.starts_with(|c: char| c.is_ascii_digit())).then_some(ident)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
