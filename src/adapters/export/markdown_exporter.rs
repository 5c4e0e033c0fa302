//! Pulldown-cmark implementation of DocumentExport.
//!
//! Converts the stored markdown PRD into a standalone HTML document. PDF
//! conversion is delegated to downstream tooling fed by this HTML.

use async_trait::async_trait;
use pulldown_cmark::{html, Options, Parser};

use crate::ports::{DocumentExport, ExportError};

/// Markdown to HTML exporter built on pulldown-cmark.
#[derive(Debug, Clone, Default)]
pub struct MarkdownExporter {
    /// Wrap output in a full HTML document with minimal styling.
    standalone: bool,
}

impl MarkdownExporter {
    /// Creates an exporter producing bare HTML fragments.
    pub fn new() -> Self {
        Self { standalone: false }
    }

    /// Produces a full HTML document instead of a fragment.
    pub fn standalone() -> Self {
        Self { standalone: true }
    }

    fn convert(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);

        let parser = Parser::new_ext(markdown, options);
        let mut body = String::new();
        html::push_html(&mut body, parser);

        if self.standalone {
            format!(
                "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
                 <style>body {{ font-family: sans-serif; max-width: 48rem; margin: 2rem auto; }}</style>\n\
                 </head>\n<body>\n{}</body>\n</html>\n",
                body
            )
        } else {
            body
        }
    }
}

#[async_trait]
impl DocumentExport for MarkdownExporter {
    async fn to_html(&self, markdown: &str) -> Result<String, ExportError> {
        if markdown.trim().is_empty() {
            return Err(ExportError::EmptyDocument);
        }
        Ok(self.convert(markdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn converts_headings_and_paragraphs() {
        let exporter = MarkdownExporter::new();
        let html = exporter
            .to_html("# PRD\n\nKort beskrivelse.")
            .await
            .unwrap();

        assert!(html.contains("<h1>PRD</h1>"));
        assert!(html.contains("<p>Kort beskrivelse.</p>"));
    }

    #[tokio::test]
    async fn converts_tables() {
        let exporter = MarkdownExporter::new();
        let html = exporter
            .to_html("| Krav | Prioritet |\n|------|-----------|\n| A | Høj |")
            .await
            .unwrap();

        assert!(html.contains("<table>"));
    }

    #[tokio::test]
    async fn standalone_wraps_full_document() {
        let exporter = MarkdownExporter::standalone();
        let html = exporter.to_html("# PRD").await.unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>PRD</h1>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[tokio::test]
    async fn empty_markdown_is_an_error() {
        let exporter = MarkdownExporter::new();
        let result = exporter.to_html("   \n  ").await;
        assert!(matches!(result, Err(ExportError::EmptyDocument)));
    }
}
