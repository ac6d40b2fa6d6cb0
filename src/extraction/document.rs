// src/extraction/document.rs
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

static BODY_SELECTOR: LazyLock<Option<Selector>> = LazyLock::new(|| Selector::parse("body").ok());
static TITLE_SELECTOR: LazyLock<Option<Selector>> =
    LazyLock::new(|| Selector::parse("title").ok());

/// Immutable, queryable view over a job posting page.
///
/// Visible text is computed once at parse time; every text pattern runs over it.
pub struct ParsedDocument {
    html: Html,
    visible_text: String,
}

impl ParsedDocument {
    pub fn parse(raw_html: &str) -> Self {
        let html = Html::parse_document(raw_html);
        let visible_text = Self::element_text(Self::body(&html), "\n");
        Self { html, visible_text }
    }

    fn body(html: &Html) -> ElementRef<'_> {
        BODY_SELECTOR
            .as_ref()
            .and_then(|selector| html.select(selector).next())
            .unwrap_or_else(|| html.root_element())
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    pub fn select_all<'a>(
        &'a self,
        selector: &'a Selector,
    ) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        self.html.select(selector)
    }

    /// Text of every visible node under `<body>`, one text node per line.
    pub fn visible_text(&self) -> &str {
        &self.visible_text
    }

    /// Visible text of the whole page joined by `separator`.
    pub fn full_text(&self, separator: &str) -> String {
        Self::element_text(Self::body(&self.html), separator)
    }

    /// Trimmed text of the first `<title>`, if any.
    pub fn page_title(&self) -> Option<String> {
        let selector = TITLE_SELECTOR.as_ref()?;
        let title = self.html.select(selector).next()?;
        let text = Self::element_text(title, " ");
        (!text.is_empty()).then_some(text)
    }

    /// Trimmed text nodes of `element`, skipping hidden subtrees, joined by `separator`.
    pub fn element_text(element: ElementRef<'_>, separator: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();

        // Explicit stack: arbitrarily deep markup must not exhaust the call stack.
        let mut stack: Vec<_> = element.children().collect();
        stack.reverse();

        while let Some(node) = stack.pop() {
            match node.value() {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        parts.push(trimmed);
                    }
                }
                Node::Element(el) if HIDDEN_ELEMENTS.contains(&el.name()) => {}
                Node::Element(_) => {
                    let mut children: Vec<_> = node.children().collect();
                    children.reverse();
                    stack.extend(children);
                }
                _ => {}
            }
        }

        parts.join(separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_text_skips_scripts_and_styles() {
        let doc = ParsedDocument::parse(
            "<html><head><title>T</title><style>p{}</style></head>\
             <body><p>Hello</p><script>var x = 1;</script><div>World</div></body></html>",
        );
        assert_eq!(doc.visible_text(), "Hello\nWorld");
        assert_eq!(doc.full_text(" "), "Hello World");
    }

    #[test]
    fn visible_text_excludes_head_title() {
        let doc = ParsedDocument::parse("<title>Head only</title><article>Body text</article>");
        assert_eq!(doc.visible_text(), "Body text");
        assert_eq!(doc.page_title().as_deref(), Some("Head only"));
    }

    #[test]
    fn element_text_joins_with_separator() {
        let doc = ParsedDocument::parse("<div id='d'> Senior <b>Rust</b>\n Engineer </div>");
        let selector = Selector::parse("#d").unwrap();
        let element = doc.select_first(&selector).unwrap();
        assert_eq!(ParsedDocument::element_text(element, " "), "Senior Rust Engineer");
        assert_eq!(ParsedDocument::element_text(element, "|"), "Senior|Rust|Engineer");
    }

    #[test]
    fn empty_document_has_no_title_and_no_text() {
        let doc = ParsedDocument::parse("");
        assert_eq!(doc.page_title(), None);
        assert_eq!(doc.visible_text(), "");
    }
}
