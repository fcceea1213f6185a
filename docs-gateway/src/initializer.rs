//! Renders the bootstrap scripts and page that hand a [`DocsConfig`] to
//! `SwaggerUIBundle` in the browser.
//!
//! Nothing here looks at the DOM: a missing mount element is reported by the
//! renderer at page load.

use crate::interceptor::RequestInterceptor;
use crate::models::{DocSource, DocsConfig};

/// The two bootstrap scripts served side by side. They carry the same
/// configuration and differ only in field order and `deepLinking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptVariant {
    /// `swagger-initializer.js`
    Initializer,
    /// `swagger-config.js`
    Config,
}

impl ScriptVariant {
    pub const ALL: [ScriptVariant; 2] = [ScriptVariant::Initializer, ScriptVariant::Config];

    pub fn file_name(&self) -> &'static str {
        match self {
            ScriptVariant::Initializer => "swagger-initializer.js",
            ScriptVariant::Config => "swagger-config.js",
        }
    }
}

/// Where the page loads the renderer bundle, standalone preset and stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLocation {
    base: String,
}

impl AssetLocation {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn bundle_js(&self) -> String {
        format!("{}/swagger-ui-bundle.js", self.base)
    }

    pub fn standalone_js(&self) -> String {
        format!("{}/swagger-ui-standalone-preset.js", self.base)
    }

    pub fn stylesheet(&self) -> String {
        format!("{}/swagger-ui.css", self.base)
    }
}

/// JSON string literal that is also safe inside an inline `<script>`.
fn js_string(value: &str) -> String {
    // serde_json never fails on a &str
    serde_json::to_string(value)
        .unwrap_or_default()
        .replace("</", "<\\/")
}

fn html_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_source(source: &DocSource, variant: ScriptVariant) -> String {
    let name = js_string(&source.name);
    let url = js_string(&source.url);
    match variant {
        ScriptVariant::Initializer => format!("{{ name: {name}, url: {url} }}"),
        ScriptVariant::Config => format!("{{ url: {url}, name: {name} }}"),
    }
}

pub fn render_script(config: &DocsConfig, variant: ScriptVariant) -> String {
    let indent = "        ";
    let urls = config
        .sources()
        .iter()
        .map(|s| format!("{indent}    {}", render_source(s, variant)))
        .collect::<Vec<_>>()
        .join(",\n");
    let presets = config
        .presets()
        .iter()
        .map(|p| format!("{indent}    {}", p.js_expr()))
        .collect::<Vec<_>>()
        .join(",\n");

    let hook = config.interceptor().script_body();
    let interceptor = match variant {
        ScriptVariant::Initializer => format!(
            "(req) => {{\n{indent}    {hook}\n{indent}    return req;\n{indent}}}"
        ),
        ScriptVariant::Config => format!(
            "function (req) {{\n{indent}    {hook}\n{indent}    return req;\n{indent}}}"
        ),
    };

    let dom_id = format!("{indent}dom_id: {},\n", js_string(config.mount_point().as_str()));
    let urls = format!("{indent}urls: [\n{urls}\n{indent}],\n");
    // The config variant always deep links; the initializer follows settings.
    let deep_linking = variant == ScriptVariant::Config || config.deep_linking();

    let mut out = String::new();
    out.push_str("window.onload = () => {\n");
    out.push_str("    window.ui = SwaggerUIBundle({\n");
    match variant {
        ScriptVariant::Initializer => {
            out.push_str(&dom_id);
            out.push_str(&urls);
        }
        ScriptVariant::Config => {
            out.push_str(&urls);
            out.push_str(&dom_id);
        }
    }
    if deep_linking {
        out.push_str(&format!("{indent}deepLinking: true,\n"));
    }
    out.push_str(&format!("{indent}requestInterceptor: {interceptor},\n"));
    out.push_str(&format!("{indent}presets: [\n{presets}\n{indent}],\n"));
    out.push_str(&format!("{indent}layout: {}\n", js_string(config.layout().as_str())));
    out.push_str("    });\n");
    out.push_str("};\n");
    out
}

pub fn render_page(config: &DocsConfig, assets: &AssetLocation) -> String {
    let script = render_script(config, ScriptVariant::Initializer);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>API Documentation</title>
    <link rel="stylesheet" type="text/css" href="{css}" />
</head>
<body>
    <div id="{mount}"></div>
    <script src="{bundle}" charset="UTF-8"></script>
    <script src="{standalone}" charset="UTF-8"></script>
    <script>
{script}    </script>
</body>
</html>
"#,
        css = html_attr(&assets.stylesheet()),
        mount = html_attr(config.mount_point().element_id()),
        bundle = html_attr(&assets.bundle_js()),
        standalone = html_attr(&assets.standalone_js()),
        script = script,
    )
}
