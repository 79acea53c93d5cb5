//! Lexical extraction of candidate class names.
//!
//! The extractor never parses markup. It walks the text once and yields every
//! maximal run of class-name characters, which makes it work the same way on
//! HTML, JSX, templates, Markdown or anything else that mentions class names.
//!
//! # Alphabet
//!
//! Outside brackets a run is made of ASCII alphanumerics and
//! `- _ : [ ] / . % ! #`. Whitespace, quotes, `=`, `<`, `>` and every other
//! byte end the run.
//!
//! Inside `[...]` the rules relax so arbitrary values survive intact:
//! anything except whitespace, quotes, `<` and `` ` `` is accepted and bracket
//! depth is tracked, so `w-[calc(100%-1rem)]` and `[&>*]:p-4` come out whole.
//!
//! # Over-approximation
//!
//! Most of what comes out is not a class at all (`div`, `class`, prose
//! words). That is expected: candidates that do not resolve are dropped later.
//! Missing a real class is the failure mode to avoid, so a run that ends in
//! prose punctuation (`.`, `:`, `/`) is yielded a second time with the
//! punctuation trimmed.

/// A candidate class name and its byte offset in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// The raw token text.
    pub value: &'a str,
    /// Byte offset of the first character within the source text.
    pub offset: usize,
}

/// Returns a lazy iterator over the candidate class names in `text`.
///
/// # Example
///
/// ```rust
/// use tailor_scan::extract;
///
/// let found: Vec<&str> = extract(r#"<div class="text-primary md:hidden">"#)
///     .map(|c| c.value)
///     .collect();
/// assert_eq!(found, ["div", "class", "text-primary", "md:hidden"]);
/// ```
pub fn extract(text: &str) -> Extractor<'_> {
    Extractor::new(text)
}

/// Iterator returned by [`extract`].
#[derive(Debug, Clone)]
pub struct Extractor<'a> {
    text: &'a str,
    pos: usize,
    pending: Option<Candidate<'a>>,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            pending: None,
        }
    }

    /// Consumes one run starting at `self.pos` and returns its end offset.
    fn scan_run(&mut self) -> usize {
        let bytes = self.text.as_bytes();
        let mut depth = 0usize;

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            if depth > 0 {
                if is_bracket_stop(b) {
                    break;
                }
                match b {
                    b'[' => depth += 1,
                    b']' => depth -= 1,
                    _ => {}
                }
            } else if b == b'[' {
                depth = 1;
            } else if !is_class_byte(b) {
                break;
            }
            self.pos += 1;
        }

        self.pos
    }
}

impl<'a> Iterator for Extractor<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        let bytes = self.text.as_bytes();
        loop {
            while self.pos < bytes.len() && !is_class_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            if self.pos >= bytes.len() {
                return None;
            }

            let start = self.pos;
            let end = self.scan_run();
            let value = &self.text[start..end];

            if !has_word_char(value) {
                continue;
            }

            let trimmed = value.trim_end_matches(['.', ':', '/']);
            if trimmed.len() != value.len() && has_word_char(trimmed) {
                self.pending = Some(Candidate {
                    value: trimmed,
                    offset: start,
                });
            }

            return Some(Candidate {
                value,
                offset: start,
            });
        }
    }
}

/// Bytes that may appear in a class name outside brackets.
fn is_class_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'-' | b'_' | b':' | b'[' | b']' | b'/' | b'.' | b'%' | b'!' | b'#'
        )
}

/// Bytes that end a run even inside brackets.
fn is_bracket_stop(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b'`' | b'<')
}

fn has_word_char(s: &str) -> bool {
    s.bytes().any(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(text: &str) -> Vec<&str> {
        extract(text).map(|c| c.value).collect()
    }

    // =========================================================================
    // Basic runs
    // =========================================================================

    #[test]
    fn test_extract_html_attribute() {
        assert_eq!(
            values(r#"<div class="text-primary md:hidden">"#),
            vec!["div", "class", "text-primary", "md:hidden"]
        );
    }

    #[test]
    fn test_extract_offsets_point_at_token_start() {
        let text = "a  bb\tccc";
        let found: Vec<_> = extract(text).collect();
        assert_eq!(found.len(), 3);
        assert_eq!(found[1].offset, 3);
        assert_eq!(&text[found[2].offset..], "ccc");
    }

    #[test]
    fn test_extract_skips_pure_punctuation() {
        assert_eq!(values("-- ... :: !"), Vec::<&str>::new());
    }

    #[test]
    fn test_extract_jsx_and_template_delimiters() {
        assert_eq!(
            values(r#"className={`p-4 ${x}`} {{ w-1/2 }}"#),
            vec!["className", "p-4", "x", "w-1/2"]
        );
    }

    #[test]
    fn test_extract_important_and_fractions() {
        assert_eq!(values("p-4! !m-2 w-1/3"), vec!["p-4!", "!m-2", "w-1/3"]);
    }

    // =========================================================================
    // Brackets
    // =========================================================================

    #[test]
    fn test_extract_arbitrary_value_keeps_inner_punctuation() {
        assert_eq!(
            values(r#"class="bg-[#ff0000] w-[calc(100%-1rem)]""#),
            vec!["class", "bg-[#ff0000]", "w-[calc(100%-1rem)]"]
        );
    }

    #[test]
    fn test_extract_arbitrary_selector_variant() {
        assert_eq!(values("[&>*]:p-4 ok"), vec!["[&>*]:p-4", "ok"]);
    }

    #[test]
    fn test_extract_nested_brackets() {
        assert_eq!(values("[&[open]]:block"), vec!["[&[open]]:block"]);
    }

    #[test]
    fn test_extract_unbalanced_bracket_stops_at_quote() {
        assert_eq!(values(r#""bg-[#fff" next"#), vec!["bg-[#fff", "next"]);
    }

    // =========================================================================
    // Trailing punctuation
    // =========================================================================

    #[test]
    fn test_extract_yields_trimmed_form_after_punctuation() {
        assert_eq!(values("use flex."), vec!["use", "flex.", "flex"]);
        assert_eq!(values("md:"), vec!["md:", "md"]);
    }

    #[test]
    fn test_extract_handles_non_ascii_text() {
        assert_eq!(values("café p-2 naïve"), vec!["caf", "p-2", "na", "ve"]);
        // Quotes end a run even inside brackets.
        assert_eq!(values("x-['→']"), vec!["x-["]);
    }
}
