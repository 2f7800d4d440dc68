// src/utils/style_stripper.rs

//! First sanitizer stage: drops `<style>` elements together with their contents.
//!
//! Runs html5ever's tokenizer over the input. After a `<style>` start tag the
//! sink switches the tokenizer into raw-text mode, so nothing inside the block
//! is ever lexed as markup and the block ends at the first `</style>`. Other
//! raw-text elements get the same treatment, so a `<style>` string inside a
//! `<script>` stays text. Surviving tokens are serialized back to HTML for the
//! allow-list stage to re-parse.

use std::cell::{Cell, RefCell};

use html5ever::TokenizerResult;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, EndTag, StartTag, Tag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};

/// How the tokenizer must read the body of an element it just opened.
fn body_kind(name: &str) -> Option<TokenSinkResult<()>> {
    let kind = match name {
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => RawKind::Rawtext,
        "script" => RawKind::ScriptData,
        "title" | "textarea" => RawKind::Rcdata,
        "plaintext" => return Some(TokenSinkResult::Plaintext),
        _ => return None,
    };
    Some(TokenSinkResult::RawData(kind))
}

/// Re-serializes tokens, skipping style blocks.
#[derive(Default)]
struct StyleStripper {
    out: RefCell<String>,
    in_style: Cell<bool>,
    /// Inside script/rawtext/plaintext: text is written back unescaped.
    verbatim: Cell<bool>,
    blocks: Cell<usize>,
}

impl StyleStripper {
    fn start_tag(&self, tag: &Tag) -> TokenSinkResult<()> {
        let name: &str = &tag.name;

        if name == "style" {
            self.blocks.set(self.blocks.get() + 1);
            if tag.self_closing {
                return TokenSinkResult::Continue;
            }
            self.in_style.set(true);
            return TokenSinkResult::RawData(RawKind::Rawtext);
        }

        let mut out = self.out.borrow_mut();
        out.push('<');
        out.push_str(name);
        for attr in &tag.attrs {
            out.push(' ');
            out.push_str(&attr.name.local);
            out.push_str("=\"");
            push_escaped(&mut out, &attr.value, true);
            out.push('"');
        }
        if tag.self_closing {
            out.push('/');
        }
        out.push('>');

        match body_kind(name) {
            Some(result) => {
                let raw = !matches!(result, TokenSinkResult::RawData(RawKind::Rcdata));
                self.verbatim.set(raw);
                result
            }
            None => TokenSinkResult::Continue,
        }
    }

    fn end_tag(&self, tag: &Tag) {
        // Inside a block the only end tag the tokenizer reports is `</style>`.
        if self.in_style.replace(false) || &*tag.name == "style" {
            return;
        }
        self.verbatim.set(false);

        let mut out = self.out.borrow_mut();
        out.push_str("</");
        out.push_str(&tag.name);
        out.push('>');
    }

    fn text(&self, text: &str) {
        if self.in_style.get() {
            return;
        }
        let mut out = self.out.borrow_mut();
        if self.verbatim.get() {
            out.push_str(text);
        } else {
            push_escaped(&mut out, text, false);
        }
    }
}

impl TokenSink for StyleStripper {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        match token {
            TagToken(tag) => match tag.kind {
                StartTag => return self.start_tag(&tag),
                EndTag => self.end_tag(&tag),
            },
            Token::CharacterTokens(text) => self.text(&text),
            Token::CommentToken(comment) if !self.in_style.get() => {
                let mut out = self.out.borrow_mut();
                out.push_str("<!--");
                out.push_str(&comment);
                out.push_str("-->");
            }
            // Doctypes mean nothing inside a fragment, NULs are dropped.
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' if attribute => out.push_str("&quot;"),
            '<' if !attribute => out.push_str("&lt;"),
            '>' if !attribute => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Removes every `<style>` element, contents included.
///
/// An unclosed `<style>` removes the rest of the document. A self-closing
/// `<style/>` and stray `</style>` tags are dropped on their own.
pub fn strip_styles(html: &str) -> String {
    let queue = BufferQueue::default();
    queue.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(StyleStripper::default(), TokenizerOpts::default());
    while !matches!(tokenizer.feed(&queue), TokenizerResult::Done) {}
    tokenizer.end();

    let blocks = tokenizer.sink.blocks.get();
    if blocks > 0 {
        tracing::debug!(blocks, "stripped style blocks");
    }

    tokenizer.sink.out.take()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_without_style_is_reserialized() {
        let input = r#"<p class="x">a &amp; b</p><!-- note --><br/> 1 &lt; 3"#;
        assert_eq!(strip_styles(input), input);
    }

    #[test]
    fn tag_names_are_lowercased() {
        assert_eq!(strip_styles("<P TITLE=\"T\">x</P>"), "<p title=\"T\">x</p>");
    }

    #[test]
    fn attribute_quotes_are_escaped() {
        assert_eq!(strip_styles(r#"<a title='say "hi"'>x</a>"#), r#"<a title="say &quot;hi&quot;">x</a>"#);
    }

    #[test]
    fn style_body_is_never_lexed_as_markup() {
        let input = "<style>p:after{content:\"<a title='x\"}</style><p>keep</p>";
        assert_eq!(strip_styles(input), "<p>keep</p>");

        let input = "<style>/* see <b class='x */</style><p>keep me</p><p>and me</p>";
        assert_eq!(strip_styles(input), "<p>keep me</p><p>and me</p>");
    }

    #[test]
    fn comment_opener_inside_style_is_discarded() {
        assert_eq!(strip_styles("<style><!-- a { } --></style>b"), "b");
        assert_eq!(strip_styles("<style><!-- a { }</style>b"), "b");
    }

    #[test]
    fn unclosed_style_swallows_rest() {
        assert_eq!(strip_styles("a<style>p { color: red }<p>b</p>"), "a");
    }

    #[test]
    fn self_closing_and_stray_style_tags_are_dropped() {
        assert_eq!(strip_styles("<style type=\"text/css\" /><p>x</p></style>"), "<p>x</p>");
    }

    #[test]
    fn style_text_inside_script_is_kept() {
        let input = "<script>var s = '<style>';</script><p>x</p>";
        assert_eq!(strip_styles(input), input);
    }

    #[test]
    fn other_raw_text_elements_keep_style_text() {
        let input = "<noscript><style>a</style></noscript><p>x</p>";
        assert_eq!(strip_styles(input), input);

        let input = "<plaintext><style>a</style>";
        assert_eq!(strip_styles(input), input);
    }

    #[test]
    fn rcdata_text_is_escaped_again() {
        assert_eq!(strip_styles("<title>a &amp; <b></title>"), "<title>a &amp; &lt;b&gt;</title>");
    }
}
