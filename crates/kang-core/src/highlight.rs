//! Syntax highlighting for display.

use serde::{Deserialize, Serialize};

use crate::lexer::{Lexer, TokenKind};

/// CSS classes per token kind. An empty class leaves the token unwrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTheme {
    pub keyword: String,
    pub identifier: String,
    pub number: String,
    pub string: String,
    pub operator: String,
    pub comment: String,
    pub whitespace: String,
    pub newline: String,
    pub unknown: String,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        Self {
            keyword: "text-purple-400 font-semibold".to_string(),
            identifier: "text-cyan-300".to_string(),
            number: "text-blue-400".to_string(),
            string: "text-green-400".to_string(),
            operator: "text-yellow-400".to_string(),
            comment: "text-gray-500 italic".to_string(),
            whitespace: String::new(),
            newline: String::new(),
            unknown: "text-yellow-400".to_string(),
        }
    }
}

impl HighlightTheme {
    pub fn class_for(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Keyword => &self.keyword,
            TokenKind::Identifier => &self.identifier,
            TokenKind::Number => &self.number,
            TokenKind::String => &self.string,
            TokenKind::Operator => &self.operator,
            TokenKind::Comment => &self.comment,
            TokenKind::Whitespace => &self.whitespace,
            TokenKind::Newline => &self.newline,
            TokenKind::Unknown => &self.unknown,
        }
    }
}

/// Render `source` as HTML with the default theme.
pub fn highlight(source: &str) -> String {
    highlight_with(source, &HighlightTheme::default())
}

/// Render `source` as HTML, wrapping each token in a `span` with its class.
pub fn highlight_with(source: &str, theme: &HighlightTheme) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    for token in Lexer::new(source) {
        let class = theme.class_for(token.kind);
        if class.is_empty() {
            escape_html_into(&token.text, &mut out);
        } else {
            out.push_str("<span class=\"");
            escape_html_into(class, &mut out);
            out.push_str("\">");
            escape_html_into(&token.text, &mut out);
            out.push_str("</span>");
        }
    }
    out
}

fn escape_html_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_theme() -> HighlightTheme {
        HighlightTheme {
            keyword: "kw".into(),
            identifier: "id".into(),
            number: "num".into(),
            string: "str".into(),
            operator: "op".into(),
            comment: "cm".into(),
            whitespace: String::new(),
            newline: String::new(),
            unknown: "?".into(),
        }
    }

    #[test]
    fn test_highlight_declaration() {
        let html = highlight_with("vibe x = 5", &plain_theme());
        insta::assert_snapshot!(html, @r#"<span class="kw">vibe</span> <span class="id">x</span> <span class="op">=</span> <span class="num">5</span>"#);
    }

    #[test]
    fn test_highlight_escapes_text() {
        let html = highlight_with("shout \"<b>&\"", &plain_theme());
        insta::assert_snapshot!(html, @r#"<span class="kw">shout</span> <span class="str">&quot;&lt;b&gt;&amp;&quot;</span>"#);
    }

    #[test]
    fn test_highlight_keeps_newlines_bare() {
        let html = highlight_with("// hi\nshout x", &plain_theme());
        assert!(html.starts_with("<span class=\"cm\">// hi</span>\n<span class=\"kw\">"));
    }

    #[test]
    fn test_default_theme_classes() {
        let html = highlight("grind 3");
        assert_eq!(
            html,
            "<span class=\"text-purple-400 font-semibold\">grind</span> <span class=\"text-blue-400\">3</span>"
        );
    }

    #[test]
    fn test_theme_from_partial_toml() {
        let theme: HighlightTheme = toml::from_str("keyword = \"kw\"").unwrap();
        assert_eq!(theme.keyword, "kw");
        assert_eq!(theme.number, HighlightTheme::default().number);
    }
}
