use pulldown_cmark::{html, Options, Parser};

/// Render a story body written in Markdown to sanitized HTML.
///
/// Supports tables, footnotes, strikethrough and smart punctuation. Raw HTML
/// in the source is cleaned by `ammonia` before it reaches the page.
pub fn render_markdown(raw: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_SMART_PUNCTUATION;

    let parser = Parser::new_ext(raw, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    ammonia::clean(&html_output)
}

/// Plain-text excerpt of a Markdown body, cut at a character boundary.
pub fn excerpt(raw: &str, max_chars: usize) -> String {
    use pulldown_cmark::Event;

    let mut text = String::new();
    for event in Parser::new(raw) {
        match event {
            Event::Text(t) | Event::Code(t) => {
                if !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
        if text.chars().count() >= max_chars {
            break;
        }
    }

    if text.chars().count() > max_chars {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_paragraph() {
        let result = render_markdown("Hello, world!");
        assert_eq!(result.trim(), "<p>Hello, world!</p>");
    }

    #[test]
    fn test_bold_and_italic() {
        let result = render_markdown("**bold** and *italic*");
        assert!(result.contains("<strong>bold</strong>"));
        assert!(result.contains("<em>italic</em>"));
    }

    #[test]
    fn test_table() {
        let input = "| A | B |\n|---|---|\n| 1 | 2 |";
        let result = render_markdown(input);
        assert!(result.contains("<table>"));
        assert!(result.contains("<td>1</td>"));
    }

    #[test]
    fn test_script_is_stripped() {
        let result = render_markdown("Hi <script>alert(1)</script> there");
        assert!(!result.contains("<script>"));
        assert!(result.contains("Hi"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_markdown(""), "");
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let text = excerpt("# Title\n\nSome **bold** words.", 200);
        assert!(text.contains("Title"));
        assert!(text.contains("bold"));
        assert!(!text.contains('#'));
        assert!(!text.contains("**"));
    }

    #[test]
    fn test_excerpt_truncates() {
        let body = "word ".repeat(100);
        let text = excerpt(&body, 20);
        assert!(text.ends_with('…'));
        assert!(text.chars().count() <= 21);
    }
}
