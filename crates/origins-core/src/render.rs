//! Renderer — maps result records onto fixed output templates.
//!
//! The HTML template shows the label as a heading and the uri as a caption,
//! each repeated in a `title` attribute. Values are interpolated verbatim
//! unless [`RenderOptions::escape_html`] is set.
//!
//! An empty result set renders as a single placeholder fragment so the list
//! never goes blank without explanation.

use crate::types::ResultRecord;
use serde::Deserialize;

/// Label markup of the empty-result placeholder.
pub const NO_RESULTS_LABEL: &str = "<em>No results..</em>";

/// Plain text shown instead of [`NO_RESULTS_LABEL`] outside HTML.
pub const NO_RESULTS_TEXT: &str = "No results..";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub escape_html: bool,
}

/// Output format for headless mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{other}` (expected html, text or json)")),
        }
    }
}

/// Render one record as an HTML fragment.
pub fn render_record(record: &ResultRecord, options: RenderOptions) -> String {
    let label = interpolate(&record.label, options);
    let uri = interpolate(&record.uri, options);
    fragment(&label, &uri)
}

/// Render a whole result set. Empty input yields exactly one placeholder.
pub fn render_results(records: &[ResultRecord], options: RenderOptions) -> Vec<String> {
    if records.is_empty() {
        return vec![placeholder()];
    }
    records.iter().map(|r| render_record(r, options)).collect()
}

/// The "no results" fragment. Its markup is never escaped.
pub fn placeholder() -> String {
    fragment(NO_RESULTS_LABEL, "")
}

/// Render records in the requested headless format, one line per record
/// (`Json` is a single line holding an array). Line breaks inside values are
/// encoded so a record never spans two lines.
pub fn render_lines(
    records: &[ResultRecord],
    format: OutputFormat,
    options: RenderOptions,
) -> serde_json::Result<Vec<String>> {
    match format {
        OutputFormat::Html => Ok(render_results(records, options)
            .iter()
            .map(|line| encode_line_breaks(line))
            .collect()),
        OutputFormat::Text if records.is_empty() => Ok(vec![NO_RESULTS_TEXT.to_string()]),
        OutputFormat::Text => Ok(records
            .iter()
            .map(|r| format!("{}\t{}", escape_text(&r.label), escape_text(&r.uri)))
            .collect()),
        OutputFormat::Json => Ok(vec![serde_json::to_string(records)?]),
    }
}

/// Backslash-escape `\`, tab, CR and LF so a text column holds no separators.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

fn encode_line_breaks(s: &str) -> String {
    s.replace('\r', "&#13;").replace('\n', "&#10;")
}

fn fragment(label: &str, uri: &str) -> String {
    format!(
        concat!(
            r#"<div class="list-group-item">"#,
            r#"<h4 class="list-group-item-heading" title="{label}">{label}</h4>"#,
            r#"<div class="list-group-item-text" title="{uri}">{uri}</div>"#,
            r#"</div>"#,
        ),
        label = label,
        uri = uri,
    )
}

fn interpolate(value: &str, options: RenderOptions) -> String {
    if options.escape_html {
        escape_html(value)
    } else {
        value.to_string()
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ResultRecord> {
        vec![ResultRecord::new("A", "u1"), ResultRecord::new("B", "u2")]
    }

    #[test]
    fn fragment_template() {
        let html = render_record(&ResultRecord::new("Gene", "http://x/gene"), RenderOptions::default());
        insta::assert_snapshot!(html, @r#"<div class="list-group-item"><h4 class="list-group-item-heading" title="Gene">Gene</h4><div class="list-group-item-text" title="http://x/gene">http://x/gene</div></div>"#);
    }

    #[test]
    fn one_fragment_per_record_in_order() {
        let out = render_results(&records(), RenderOptions::default());
        assert_eq!(out.len(), 2);
        assert!(out[0].contains(">A</h4>"));
        assert!(out[1].contains(">B</h4>"));
    }

    #[test]
    fn empty_renders_single_placeholder() {
        let out = render_results(&[], RenderOptions::default());
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("No results.."));
        assert!(out[0].contains(r#"title="""#));
    }

    #[test]
    fn placeholder_markup_survives_escaping() {
        let out = render_results(&[], RenderOptions { escape_html: true });
        assert!(out[0].contains("<em>No results..</em>"));
    }

    #[test]
    fn values_are_verbatim_by_default() {
        let html = render_record(&ResultRecord::new("<b>x</b>", "u"), RenderOptions::default());
        assert!(html.contains(r#"title="<b>x</b>">"#));
    }

    #[test]
    fn escape_html_option() {
        let html = render_record(
            &ResultRecord::new(r#"a<"b">&'c'"#, "u"),
            RenderOptions { escape_html: true },
        );
        assert!(html.contains("a&lt;&quot;b&quot;&gt;&amp;&#x27;c&#x27;"));
    }

    #[test]
    fn text_lines() {
        let lines = render_lines(&records(), OutputFormat::Text, RenderOptions::default()).unwrap();
        assert_eq!(lines, vec!["A\tu1".to_string(), "B\tu2".to_string()]);
        let empty = render_lines(&[], OutputFormat::Text, RenderOptions::default()).unwrap();
        assert_eq!(empty, vec![NO_RESULTS_TEXT.to_string()]);
    }

    #[test]
    fn text_lines_escape_separators() {
        let records = vec![
            ResultRecord::new("Gene\nA", "u1"),
            ResultRecord::new("B", "u\t2\\x\r"),
        ];
        let lines = render_lines(&records, OutputFormat::Text, RenderOptions::default()).unwrap();
        assert_eq!(
            lines,
            vec!["Gene\\nA\tu1".to_string(), "B\tu\\t2\\\\x\\r".to_string()]
        );
        assert_eq!(lines.join("\n").lines().count(), 2);
        assert!(lines.iter().all(|l| l.matches('\t').count() == 1));
    }

    #[test]
    fn html_lines_encode_line_breaks() {
        let records = vec![ResultRecord::new("Gene\r\nA", "u1"), ResultRecord::new("B", "u2")];
        let lines = render_lines(&records, OutputFormat::Html, RenderOptions::default()).unwrap();
        assert_eq!(lines.join("\n").lines().count(), 2);
        assert!(lines[0].contains(">Gene&#13;&#10;A</h4>"));
    }

    #[test]
    fn json_lines() {
        let lines = render_lines(&records(), OutputFormat::Json, RenderOptions::default()).unwrap();
        assert_eq!(
            lines,
            vec![r#"[{"label":"A","uri":"u1"},{"label":"B","uri":"u2"}]"#.to_string()]
        );
    }

    #[test]
    fn parse_format() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("txt".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
