//! Trace to HTML conversion.
//!
//! The report has two parts:
//!
//! - a **helper panel** listing every module with one checkbox per variable,
//!   used to hide and show parts of the report;
//! - one section per **step**, with a table per module. Each table row carries
//!   the tags computed by [`Classifier::classes`] in its `class` attribute, so
//!   changed values and cross-module differences can be styled.
//!
//! The trace should be completed (see [`Trace::complete`]) before rendering,
//! otherwise only the variables printed at each step are shown.
//!
//! # Examples
//!
//! ```
//! use ceviz_rs::classify::Classifier;
//! use ceviz_rs::trace::Trace;
//!
//! let mut trace: Trace = "Trace Type: Counterexample\nm1.x = 1\n".parse().unwrap();
//! trace.complete();
//!
//! let html = trace.to_html(&Classifier::default()).unwrap();
//! assert!(html.contains("<h2>Step 1</h2>"));
//! ```

use std::fmt::{self, Write as _};

use crate::classify::Classifier;
use crate::trace::Trace;

const DEFAULT_STYLE: &str = r#"
body { font-family: sans-serif; font-size: 10pt; }
div.helper { float: right; width: 20em; max-height: 95vh; overflow: auto; position: sticky; top: 0; }
div.helper ul { list-style: none; padding-left: 1em; }
div.state { display: inline-block; vertical-align: top; margin: 0 1em 1em 0; }
div.state table { border-collapse: collapse; }
div.state th, div.state td { border: 1px solid #ccc; padding: 1px 4px; text-align: left; }
tr.changed td { font-weight: bold; background: #ffe9a8; }
tr.equals td { color: #1a7f37; }
tr.not-equals td { color: #cf222e; }
tr.one-sided td { color: #bc4c00; font-style: italic; }
"#;

const FILTER_SCRIPT: &str = r#"
document.querySelectorAll("div.helper input[type=checkbox]").forEach(function (box) {
  box.addEventListener("change", function () {
    var module = box.dataset.module;
    var variable = box.dataset.var;
    document.querySelectorAll("div.state").forEach(function (div) {
      if (div.dataset.module !== module) return;
      if (variable === undefined) {
        div.style.display = box.checked ? "" : "none";
        return;
      }
      div.querySelectorAll("tr").forEach(function (tr) {
        if (tr.dataset.var === variable) tr.style.display = box.checked ? "" : "none";
      });
    });
  });
});
"#;

/// Configuration options for HTML output generation.
#[derive(Debug, Clone)]
pub struct HtmlConfig {
    /// Document title (default: "Counterexample")
    pub title: String,
    /// External stylesheet to link (default: none)
    pub stylesheet: Option<String>,
    /// Whether to embed the built-in stylesheet (default: true)
    pub embed_style: bool,
    /// Whether to embed the hide/show script (default: true)
    pub embed_script: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: "Counterexample".to_string(),
            stylesheet: None,
            embed_style: true,
            embed_script: true,
        }
    }
}

/// Displays a string with HTML special characters escaped.
#[derive(Debug, Copy, Clone)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

impl Trace {
    /// Converts the trace to an HTML report with the default configuration.
    pub fn to_html(&self, classifier: &Classifier) -> Result<String, fmt::Error> {
        self.to_html_with_config(classifier, &HtmlConfig::default())
    }

    /// Converts the trace to an HTML report.
    pub fn to_html_with_config(&self, classifier: &Classifier, config: &HtmlConfig) -> Result<String, fmt::Error> {
        let mut html = String::new();
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html>")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>{}</title>", Escaped(&config.title))?;
        if let Some(href) = &config.stylesheet {
            writeln!(html, "<link href=\"{}\" rel=\"stylesheet\" type=\"text/css\">", Escaped(href))?;
        }
        if config.embed_style {
            writeln!(html, "<style>{}</style>", DEFAULT_STYLE)?;
        }
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;

        self.write_helper(&mut html)?;
        for step in 0..self.num_steps() {
            self.write_step(&mut html, classifier, step)?;
        }

        if config.embed_script {
            writeln!(html, "<script>{}</script>", FILTER_SCRIPT)?;
        }
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")?;
        Ok(html)
    }

    fn write_helper(&self, html: &mut String) -> fmt::Result {
        writeln!(html, "<div class=\"helper\">")?;
        writeln!(html, "<h2>Modules</h2>")?;
        for module in self.module_names() {
            let m = Escaped(module);
            writeln!(html, "<div>")?;
            writeln!(html, "<h3>{}</h3>", m)?;
            writeln!(html, "<ul>")?;
            writeln!(
                html,
                "<li><label><input type=\"checkbox\" checked data-module=\"{}\"> all</label></li>",
                m
            )?;
            for var in self.variables_in_module(module) {
                let v = Escaped(var);
                writeln!(
                    html,
                    "<li><label><input type=\"checkbox\" checked data-module=\"{}\" data-var=\"{}\"> {}</label></li>",
                    m, v, v
                )?;
            }
            writeln!(html, "</ul>")?;
            writeln!(html, "</div>")?;
        }
        writeln!(html, "</div>")
    }

    fn write_step(&self, html: &mut String, classifier: &Classifier, step: usize) -> fmt::Result {
        writeln!(html, "<h2>Step {}</h2>", step + 1)?;
        for module in self.module_names() {
            let m = Escaped(module);
            writeln!(html, "<div class=\"state {}\" data-module=\"{}\">", m, m)?;
            writeln!(html, "<h3>{}</h3>", m)?;
            writeln!(html, "<table>")?;
            for (var, value) in self.step(module, step).into_iter().flatten() {
                let classes = classifier.classes(self, module, step, var);
                writeln!(
                    html,
                    "<tr class=\"{}\" data-var=\"{}\"><th>{}</th><td>{}</td></tr>",
                    Escaped(&classes),
                    Escaped(var),
                    Escaped(var),
                    Escaped(value)
                )?;
            }
            writeln!(html, "</table>")?;
            writeln!(html, "</div>")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn trace() -> Trace {
        let text = "\
Trace Type: Counterexample
-> State: 1.1 <-
  m1.x = 1
  m2.x = 1
  flag = TRUE
-> Input: 1.2 <-
  req = TRUE
-> State: 1.2 <-
  m1.x = 2
";
        let mut trace: Trace = text.parse().unwrap();
        trace.complete();
        trace
    }

    #[test]
    fn test_to_html_basic() {
        let html = trace().to_html(&Classifier::default()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>\n"));
        assert!(html.contains("<h2>Step 1</h2>"));
        assert!(html.contains("<h2>Step 2</h2>"));
        assert!(!html.contains("<h2>Step 3</h2>"));
    }

    #[test]
    fn test_to_html_rows() {
        let html = trace().to_html(&Classifier::default()).unwrap();
        assert!(html.contains(
            "<tr class=\"changed equals no-sub-module x\" data-var=\"x\"><th>x</th><td>1</td></tr>"
        ));
        assert!(html.contains(
            "<tr class=\"changed not-equals no-sub-module x\" data-var=\"x\"><th>x</th><td>2</td></tr>"
        ));
        assert!(html.contains(
            "<tr class=\"not-changed no-compare no-sub-module flag\" data-var=\"flag\"><th>flag</th><td>TRUE</td></tr>"
        ));
    }

    #[test]
    fn test_to_html_helper() {
        let html = trace().to_html(&Classifier::default()).unwrap();
        assert!(html.contains("<h3>input</h3>"));
        assert!(html.contains("data-module=\"input\" data-var=\"req\"> req"));
        assert!(html.contains("<div class=\"state global\" data-module=\"global\">"));
    }

    #[test]
    fn test_to_html_with_config() {
        let config = HtmlConfig {
            title: "a < b".to_string(),
            stylesheet: Some("nusmv-style.css".to_string()),
            embed_style: false,
            embed_script: false,
        };
        let html = trace().to_html_with_config(&Classifier::default(), &config).unwrap();
        assert!(html.contains("<title>a &lt; b</title>"));
        assert!(html.contains("<link href=\"nusmv-style.css\""));
        assert!(!html.contains("<style>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_to_html_empty_trace() {
        let html = Trace::empty().to_html(&Classifier::default()).unwrap();
        assert!(!html.contains("<h2>Step"));
        assert!(html.contains("<h3>global</h3>"));
    }

    #[test]
    fn test_escaped() {
        assert_eq!(Escaped("a<b & \"c\"").to_string(), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(Escaped("plain").to_string(), "plain");
    }
}
