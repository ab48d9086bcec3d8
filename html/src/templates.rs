//! HTML rendering for report pages.
//!
//! Rendering is a pure function of the view data. [`Templates`] is the seam
//! for swapping in a different presentation; [`BuiltinTemplates`] produces
//! self-contained pages with the stylesheet inlined.

use audit_report_core::{CodeAggregate, Finding, PageSummary, Severity};
use audit_report_store::ReporterConfig;
use chrono::{DateTime, Utc};

use crate::error::{ReportError, Result};

/// Stylesheet inlined when the configuration does not name one.
pub const DEFAULT_CSS: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; color: #222; }
a { color: #0b5cad; }
table { border-collapse: collapse; width: 100%; }
th, td { border-bottom: 1px solid #ddd; padding: .4rem .6rem; text-align: left; vertical-align: top; }
pre { white-space: pre-wrap; word-break: break-all; margin: 0; }
.error { color: #b00020; }
.warning { color: #8a5a00; }
.notice { color: #00587a; }
.bar { display: flex; height: .6rem; width: 16rem; background: #eee; }
.bar span.error { background: #b00020; }
.bar span.warning { background: #e0a000; }
.bar span.notice { background: #3a8fb7; }
.note-codes li { display: inline; margin-right: .5rem; }
";

/// Data for the header written when a session opens `index.html`.
#[derive(Debug, Clone, Copy)]
pub struct IndexHeaderView<'a> {
    pub date: DateTime<Utc>,
    pub title: Option<&'a str>,
    pub css: &'a str,
}

/// Data for a page report and its index entry.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub date: DateTime<Utc>,
    pub page: &'a PageSummary,
    pub css: &'a str,
}

/// Data for `index-codes.html`.
#[derive(Debug, Clone, Copy)]
pub struct CodesIndexView<'a> {
    pub date: DateTime<Utc>,
    pub title: Option<&'a str>,
    pub codes: &'a [CodeAggregate],
    pub css: &'a str,
}

/// Data for one per-code report.
#[derive(Debug, Clone, Copy)]
pub struct CodeReportView<'a> {
    pub date: DateTime<Utc>,
    pub code: &'a CodeAggregate,
    pub css: &'a str,
}

/// Renders every artifact of a report set.
pub trait Templates {
    /// Opening of `index.html`. Entries are appended after it.
    fn index_header(&self, view: &IndexHeaderView<'_>) -> String;
    /// Standalone report for one page.
    fn page_report(&self, view: &PageView<'_>) -> String;
    /// Fragment appended to `index.html` for one page.
    fn index_entry(&self, view: &PageView<'_>) -> String;
    /// Ranked index of all diagnostic codes.
    fn codes_index(&self, view: &CodesIndexView<'_>) -> String;
    /// Standalone report for one diagnostic code.
    fn code_report(&self, view: &CodeReportView<'_>) -> String;
}

/// Minimal built-in presentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl Templates for BuiltinTemplates {
    fn index_header(&self, view: &IndexHeaderView<'_>) -> String {
        let title = escape_html(view.title.unwrap_or("Accessibility report"));
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<h1>{title}</h1>
<p>Generated {date}. <a href="./index-codes.html">Browse by code</a></p>
<ul class="pages">
"#,
            css = view.css,
            date = format_date(view.date),
        )
    }

    fn page_report(&self, view: &PageView<'_>) -> String {
        let page = view.page;
        let note_codes = page
            .note_codes
            .iter()
            .map(|code| format!("<li>{}</li>", escape_html(code)))
            .collect::<String>();
        let results = page.results.iter().map(render_finding_row).collect::<String>();
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Report for {url}</title>
<style>{css}</style>
</head>
<body>
<p><a href="./index.html">All pages</a></p>
<h1>{url}</h1>
<p>Generated {date}.</p>
{summary}
<h2>Guideline references</h2>
<ul class="note-codes">{note_codes}</ul>
<h2>Findings</h2>
<table>
<thead><tr><th>Level</th><th>Code</th><th>Message</th><th>Selector</th><th>Context</th></tr></thead>
<tbody>
{results}</tbody>
</table>
</body>
</html>
"#,
            url = escape_html(&page.url),
            css = view.css,
            date = format_date(view.date),
            summary = render_severity_summary(page),
        )
    }

    fn index_entry(&self, view: &PageView<'_>) -> String {
        let page = view.page;
        format!(
            r#"<li class="page">
<a href="{report_url}">{url}</a>
<span class="error">{errors} errors</span>,
<span class="warning">{warnings} warnings</span>,
<span class="notice">{notices} notices</span>
{bar}
</li>
"#,
            report_url = escape_html(&page.report_url),
            url = escape_html(&page.url),
            errors = page.counts.error,
            warnings = page.counts.warning,
            notices = page.counts.notice,
            bar = render_bar(page),
        )
    }

    fn codes_index(&self, view: &CodesIndexView<'_>) -> String {
        let title = escape_html(view.title.unwrap_or("Accessibility report"));
        let rows = view
            .codes
            .iter()
            .enumerate()
            .map(|(rank, code)| {
                format!(
                    "<tr><td>{rank}</td><td><a href=\"{report_url}\">{code}</a></td>\
                     <td class=\"{level}\">{level}</td><td>{instances}</td><td>{message}</td></tr>\n",
                    rank = rank + 1,
                    report_url = escape_html(&code.report_url),
                    code = escape_html(&code.code),
                    level = escape_html(&code.level),
                    instances = code.instances,
                    message = escape_html(&code.message),
                )
            })
            .collect::<String>();
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}: codes</title>
<style>{css}</style>
</head>
<body>
<p><a href="./index.html">All pages</a></p>
<h1>{title}: codes</h1>
<p>Generated {date}. {count} distinct codes.</p>
<table>
<thead><tr><th>#</th><th>Code</th><th>Level</th><th>Instances</th><th>Message</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</body>
</html>
"#,
            css = view.css,
            date = format_date(view.date),
            count = view.codes.len(),
        )
    }

    fn code_report(&self, view: &CodeReportView<'_>) -> String {
        let code = view.code;
        let rows = code
            .urls
            .iter()
            .map(|occurrence| {
                format!(
                    "<tr><td><a href=\"{url}\">{url}</a></td><td><code>{selector}</code></td>\
                     <td><pre><code>{context}</code></pre></td></tr>\n",
                    url = escape_html(&occurrence.url),
                    selector = escape_html(&occurrence.selector),
                    context = escape_html(&occurrence.context),
                )
            })
            .collect::<String>();
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{code}</title>
<style>{css}</style>
</head>
<body>
<p><a href="./index-codes.html">All codes</a></p>
<h1>{code}</h1>
<p class="{level}">{level}: {message}</p>
<p>Generated {date}. {instances} instances.</p>
<table>
<thead><tr><th>Page</th><th>Selector</th><th>Context</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
</body>
</html>
"#,
            code = escape_html(&code.code),
            css = view.css,
            level = escape_html(&code.level),
            message = escape_html(&code.message),
            date = format_date(view.date),
            instances = code.instances,
        )
    }
}

/// Returns the configured stylesheet, or [`DEFAULT_CSS`].
pub fn load_stylesheet(config: &ReporterConfig) -> Result<String> {
    match &config.stylesheet {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ReportError::ReadStylesheet {
            path: path.clone(),
            source,
        }),
        None => Ok(DEFAULT_CSS.to_string()),
    }
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn render_severity_summary(page: &PageSummary) -> String {
    let mut out = String::from("<ul class=\"summary\">\n");
    for severity in [Severity::Error, Severity::Warning, Severity::Notice] {
        out.push_str(&format!(
            "<li class=\"{severity}\">{count} {severity}s ({percentage:.1}%)</li>\n",
            count = page.counts.get(severity),
            percentage = page.counts.percentage(severity),
        ));
    }
    out.push_str("</ul>");
    out
}

fn render_bar(page: &PageSummary) -> String {
    let mut out = String::from("<div class=\"bar\">");
    for severity in [Severity::Error, Severity::Warning, Severity::Notice] {
        out.push_str(&format!(
            "<span class=\"{severity}\" style=\"width: {:.3}%\"></span>",
            page.counts.percentage(severity)
        ));
    }
    out.push_str("</div>");
    out
}

fn render_finding_row(finding: &Finding) -> String {
    format!(
        "<tr><td class=\"{level}\">{level}</td><td>{code}</td><td>{message}</td>\
         <td><code>{selector}</code></td><td><pre><code>{context}</code></pre></td></tr>\n",
        level = escape_html(&finding.level),
        code = escape_html(&finding.code),
        message = escape_html(&finding.message),
        selector = escape_html(&finding.selector),
        context = escape_html(&finding.context),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_report_core::{aggregate_codes, summarize_page};

    fn date() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<img alt="a & b">'"#),
            "&lt;img alt=&quot;a &amp; b&quot;&gt;&#39;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_page_report_escapes_context_and_lists_note_codes() {
        let url = "https://example.com/?a=1&b=2";
        let page = summarize_page(
            url,
            vec![
                Finding::new("WCAG2AA.Principle1.Guideline1_1.1_1_1.H37", "error", url)
                    .with_location("<img src=\"x.png\">", "html > body > img"),
            ],
        );
        let html = BuiltinTemplates.page_report(&PageView { date: date(), page: &page, css: "" });
        assert!(html.contains("&lt;img src=&quot;x.png&quot;&gt;"));
        assert!(html.contains("<li>H37</li>"));
        assert!(html.contains("https://example.com/?a=1&amp;b=2"));
        assert!(html.contains("1 errors (100.0%)"));
        assert!(html.contains("2023-11-14 22:13:20 UTC"));
    }

    #[test]
    fn test_index_entry_links_to_page_report() {
        let page = summarize_page("https://example.com/", Vec::new());
        let html = BuiltinTemplates.index_entry(&PageView { date: date(), page: &page, css: "" });
        assert!(html.contains(&format!("href=\"./{}.html\"", page.hash)));
        assert!(html.contains("0 errors"));
        assert!(html.starts_with("<li"));
    }

    #[test]
    fn test_index_header_uses_title_and_css() {
        let html = BuiltinTemplates.index_header(&IndexHeaderView {
            date: date(),
            title: Some("Nightly <audit>"),
            css: "body{}",
        });
        assert!(html.contains("<h1>Nightly &lt;audit&gt;</h1>"));
        assert!(html.contains("<style>body{}</style>"));
    }

    #[test]
    fn test_codes_index_ranks_rows() {
        let history = vec![vec![
            Finding::new("A", "error", "p"),
            Finding::new("B", "notice", "p"),
            Finding::new("B", "notice", "q"),
        ]];
        let codes = aggregate_codes(&history);
        let html = BuiltinTemplates.codes_index(&CodesIndexView {
            date: date(),
            title: None,
            codes: &codes,
            css: "",
        });
        let b = html.find(">B</a>").unwrap();
        let a = html.find(">A</a>").unwrap();
        assert!(b < a);
        assert!(html.contains("2 distinct codes"));
    }

    #[test]
    fn test_code_report_lists_occurrences() {
        let history = vec![
            vec![Finding::new("X", "error", "https://a.test/").with_location("<p>", "p")],
            vec![Finding::new("X", "error", "https://b.test/").with_location("<div>", "div")],
        ];
        let codes = aggregate_codes(&history);
        let html = BuiltinTemplates.code_report(&CodeReportView { date: date(), code: &codes[0], css: "" });
        assert!(html.contains("https://a.test/"));
        assert!(html.contains("https://b.test/"));
        assert!(html.contains("&lt;div&gt;"));
        assert!(html.contains("2 instances"));
    }

    #[test]
    fn test_load_stylesheet_default_and_custom() {
        let config = ReporterConfig::new("out");
        assert_eq!(load_stylesheet(&config).unwrap(), DEFAULT_CSS);

        let dir = tempfile::tempdir().unwrap();
        let css = dir.path().join("site.css");
        std::fs::write(&css, "h1 { color: red; }").unwrap();
        let config = ReporterConfig::new("out").with_stylesheet(&css);
        assert_eq!(load_stylesheet(&config).unwrap(), "h1 { color: red; }");

        let config = ReporterConfig::new("out").with_stylesheet(dir.path().join("missing.css"));
        assert!(matches!(
            load_stylesheet(&config),
            Err(ReportError::ReadStylesheet { .. })
        ));
    }
}
