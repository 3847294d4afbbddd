use pulldown_cmark::{Options, Parser, html};

/// Renders summary markdown for display
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, text: &str) -> String;
}

/// CommonMark to HTML, with the GitHub extensions LLM output tends to use
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl MarkdownRenderer for HtmlRenderer {
    fn render(&self, text: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, Parser::new_ext(text, options));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_renders_empty() {
        assert_eq!(HtmlRenderer.render(""), "");
    }

    #[test]
    fn headings_and_lists() {
        let html = HtmlRenderer.render("# Title\n\n- one\n- two\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<li>one</li>"));
    }
}
