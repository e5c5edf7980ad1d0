//! HTML fragment builders for the reference document.
//!
//! Fragments are plain strings joined by the emitter. Every interpolated value
//! is escaped; content-file bodies are the one exception and are included
//! verbatim because they already are markdown/HTML.

use crate::catalog::{OptionDescriptor, OptionName};
use pulldown_cmark::{Event, Options, Parser, html};

pub const RELEASE_NOTES_BASE: &str = "/docs/release-notes";

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders short prose values (e.g. a default described in words).
pub trait InlineRenderer {
    fn render(&self, text: &str) -> String;
}

/// Renders markdown with pulldown-cmark. Raw HTML in the source is escaped
/// rather than passed through.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParagraphRenderer;

impl InlineRenderer for ParagraphRenderer {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text.trim(), Options::ENABLE_STRIKETHROUGH).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut rendered = String::new();
        html::push_html(&mut rendered, parser);
        rendered.truncate(rendered.trim_end().len());
        rendered
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One row of an option's metadata table.
pub struct MetadataRow {
    pub label: &'static str,
    pub value_html: String,
}

/// Rows for whichever metadata fields the descriptor carries.
///
/// Row order is fixed: deprecated status, recommended, default, allowed
/// values, related options, internal status, release version.
pub fn metadata_rows(option: &OptionDescriptor, renderer: &dyn InlineRenderer) -> Vec<MetadataRow> {
    let mut rows = Vec::new();
    if option.deprecated {
        rows.push(row("Status", "<p>Deprecated</p>".to_string()));
    }
    if option.recommended {
        rows.push(row("Recommended", "<p>True</p>".to_string()));
    }
    if let Some(default) = option.default_value.as_deref() {
        let value = if default.contains(' ') {
            renderer.render(default)
        } else {
            format!("<p><code>{}</code></p>", escape_html(default))
        };
        rows.push(row("Default", value));
    }
    if !option.allowed_values.is_empty() {
        let items = option
            .allowed_values
            .iter()
            .map(|value| format!("<li><p><code>{}</code></p></li>", escape_html(value)))
            .collect::<String>();
        rows.push(row("Allowed", format!("<ul>{items}</ul>")));
    }
    if !option.related.is_empty() {
        let items = option
            .related
            .iter()
            .map(related_link)
            .collect::<String>();
        rows.push(row("Related", format!("<ul>{items}</ul>")));
    }
    if option.internal {
        rows.push(row("Status", "<p>internal</p>".to_string()));
    }
    if let Some(version) = option.release_version.as_deref() {
        rows.push(row("Released", release_link(version)));
    }
    rows
}

fn row(label: &'static str, value_html: String) -> MetadataRow {
    MetadataRow { label, value_html }
}

fn related_link(name: &OptionName) -> String {
    let name = escape_html(name.as_str());
    format!(
        "<li><a href=\"#{name}\" aria-label=\"Jump to option info for {name}\"><code>{name}</code></a></li>"
    )
}

fn release_link(version: &str) -> String {
    let slug = escape_html(&version.replace('.', "-"));
    let version = escape_html(version);
    format!(
        "<p><a aria-label=\"Release notes for version {version}\" href=\"{RELEASE_NOTES_BASE}/{slug}.html\">{version}</a></p>"
    )
}

pub fn render_metadata_table(rows: &[MetadataRow]) -> String {
    let mut html = String::from("<ul class=\"option-metadata\">\n");
    for row in rows {
        html.push_str(&format!(
            "<li><span>{}:</span>{}</li>\n",
            row.label, row.value_html
        ));
    }
    html.push_str("</ul>");
    html
}

pub fn section_open() -> String {
    "<div class=\"reference-section\">".to_string()
}

pub fn section_close() -> String {
    "</div>".to_string()
}

/// Navigation list over `(anchor, display)` pairs.
pub fn category_nav(entries: &[(String, String)]) -> String {
    let mut html = String::from("<nav class=\"category-nav\"><ul>\n");
    for (anchor, display) in entries {
        html.push_str(&format!(
            "<li><a href=\"#{}\">{}</a></li>\n",
            escape_html(anchor),
            escape_html(display)
        ));
    }
    html.push_str("</ul></nav>");
    html
}

pub fn category_block(anchor: &str, display: &str, body: &str) -> String {
    let anchor = escape_html(anchor);
    let display = escape_html(display);
    format!(
        "<div class=\"category\">\n<h2 id=\"{anchor}\"><a href=\"#{anchor}\" aria-label=\"Link to the section {display}\">#</a>{display}</h2>\n\n{}</div>",
        body_block(body)
    )
}

/// Option block: anchored heading, body and (when given) metadata table.
pub fn option_block(anchor: &str, name: &str, display: &str, body: &str, table: Option<&str>) -> String {
    let anchor = escape_html(anchor);
    let name = escape_html(name);
    let display = escape_html(display);
    let mut html = format!(
        "<section class=\"config-option\">\n<h3 id=\"{anchor}\"><a aria-label=\"Link to the option: {name}\" id=\"{anchor}-config\" href=\"#{anchor}\">#</a>\n{display} - <code>{name}</code></h3>\n<div class=\"option-content\">\n\n{}</div>",
        body_block(body)
    );
    if let Some(table) = table {
        html.push('\n');
        html.push_str(table);
    }
    html.push_str("\n</section>");
    html
}

fn body_block(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!("{body}\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryCode;

    fn descriptor() -> OptionDescriptor {
        OptionDescriptor {
            name: OptionName::from("target"),
            category_code: CategoryCode::from("6254"),
            ..Default::default()
        }
    }

    #[test]
    fn default_only_yields_single_default_row() {
        let mut option = descriptor();
        option.default_value = Some("ES5".to_string());
        let rows = metadata_rows(&option, &ParagraphRenderer);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "Default");
        assert_eq!(rows[0].value_html, "<p><code>ES5</code></p>");
    }

    #[test]
    fn no_metadata_yields_empty_table() {
        let rows = metadata_rows(&descriptor(), &ParagraphRenderer);
        assert!(rows.is_empty());
        assert_eq!(
            render_metadata_table(&rows),
            "<ul class=\"option-metadata\">\n</ul>"
        );
    }

    #[test]
    fn rows_follow_fixed_order() {
        let mut option = descriptor();
        option.release_version = Some("4.1".to_string());
        option.internal = true;
        option.related = vec![OptionName::from("lib")];
        option.allowed_values = vec!["es5".to_string()];
        option.default_value = Some("ES5".to_string());
        option.recommended = true;
        option.deprecated = true;

        let labels: Vec<_> = metadata_rows(&option, &ParagraphRenderer)
            .iter()
            .map(|row| row.label)
            .collect();
        assert_eq!(
            labels,
            ["Status", "Recommended", "Default", "Allowed", "Related", "Status", "Released"]
        );
    }

    #[test]
    fn prose_defaults_use_inline_renderer() {
        let mut option = descriptor();
        option.default_value = Some("`true` if `strict`; otherwise <false>".to_string());
        let rows = metadata_rows(&option, &ParagraphRenderer);
        assert_eq!(
            rows[0].value_html,
            "<p><code>true</code> if <code>strict</code>; otherwise &lt;false&gt;</p>"
        );
    }

    #[test]
    fn prose_defaults_render_links_and_emphasis() {
        let html = ParagraphRenderer
            .render("`Classic` if [`module`](#module) is `AMD`; *Node* otherwise");
        assert_eq!(
            html,
            "<p><code>Classic</code> if <a href=\"#module\"><code>module</code></a> is <code>AMD</code>; <em>Node</em> otherwise</p>"
        );
    }

    #[test]
    fn release_row_links_to_notes() {
        let mut option = descriptor();
        option.release_version = Some("4.1".to_string());
        let rows = metadata_rows(&option, &ParagraphRenderer);
        assert!(rows[0].value_html.contains("href=\"/docs/release-notes/4-1.html\""));
        assert!(rows[0].value_html.contains(">4.1</a>"));
    }

    #[test]
    fn option_block_omits_table_when_absent() {
        let html = option_block("watch-watchFile", "watchFile", "Watch File", "body", None);
        assert!(html.contains("<h3 id=\"watch-watchFile\">"));
        assert!(html.contains("Watch File - <code>watchFile</code>"));
        assert!(!html.contains("option-metadata"));
    }

    #[test]
    fn empty_bodies_leave_no_blank_run() {
        let html = option_block("strict", "strict", "Strict", "", None);
        assert!(!html.contains("\n\n\n"), "{html}");
        assert!(!category_block("Emit_6246", "Emit", "").contains("\n\n\n"));
    }

    #[test]
    fn escape_html_covers_attribute_quotes() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
    }
}
