//! Bracketed arbitrary values (`bg-[#ff0000]`, `w-[calc(100%-1rem)]`).

use cssparser::{Parser, ParserInput, Token};

use crate::utilities::ValueKind;

/// A literal value lifted out of a class name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitraryValue {
    pub value: String,
    pub kind: ValueKind,
}

/// Parses `[...]` into a value.
///
/// Underscores become spaces. A leading `color:`, `length:` or `number:`
/// hint fixes the kind; otherwise the value is classified by its first CSS
/// token. Returns `None` for anything that is not a well-formed value.
pub fn parse_arbitrary(raw: &str) -> Option<ArbitraryValue> {
    let inner = raw.strip_prefix('[')?.strip_suffix(']')?;

    let (hint, inner) = match inner.split_once(':') {
        Some((hint, rest)) => match type_hint(hint) {
            Some(kind) => (Some(kind), rest),
            None => (None, inner),
        },
        None => (None, inner),
    };

    let value = inner.replace('_', " ");
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let classified = classify(value)?;
    Some(ArbitraryValue {
        value: value.to_string(),
        kind: hint.unwrap_or(classified),
    })
}

fn type_hint(hint: &str) -> Option<ValueKind> {
    match hint {
        "color" => Some(ValueKind::Color),
        "length" | "percentage" => Some(ValueKind::Length),
        "number" => Some(ValueKind::Number),
        "any" => Some(ValueKind::Any),
        _ => None,
    }
}

/// Classifies a CSS value by its leading token.
///
/// Returns `None` when the value does not tokenize cleanly (bad strings or
/// urls, stray closing brackets) or could escape its declaration (`;`,
/// braces, `!`).
pub fn classify(value: &str) -> Option<ValueKind> {
    if !is_balanced(value, &['{', '}', ';', '!']) {
        return None;
    }
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);

    let mut kind = None;
    while let Ok(token) = parser.next() {
        let this = match token {
            Token::BadString(_)
            | Token::BadUrl(_)
            | Token::CloseParenthesis
            | Token::CloseSquareBracket
            | Token::CloseCurlyBracket
            | Token::CurlyBracketBlock
            | Token::Semicolon
            | Token::Delim('!') => return None,
            Token::Hash(_) | Token::IDHash(_) => ValueKind::Color,
            Token::Dimension { .. } | Token::Percentage { .. } => ValueKind::Length,
            Token::Number { value, .. } if *value == 0.0 => ValueKind::Length,
            Token::Number { .. } => ValueKind::Number,
            Token::Function(name) => function_kind(name),
            _ => ValueKind::Any,
        };
        kind.get_or_insert(this);
    }
    kind
}

/// Whether `text` has balanced parentheses, brackets and quotes, and none of
/// the `forbidden` characters outside a quoted string. Backslash escapes are
/// only allowed inside quotes.
pub(crate) fn is_balanced(text: &str, forbidden: &[char]) -> bool {
    let mut closers = Vec::new();
    let mut quote = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => closers.push(')'),
            '[' => closers.push(']'),
            ')' | ']' => {
                if closers.pop() != Some(c) {
                    return false;
                }
            }
            '\\' => return false,
            c if forbidden.contains(&c) => return false,
            _ => {}
        }
    }
    quote.is_none() && closers.is_empty()
}

fn function_kind(name: &str) -> ValueKind {
    const COLOR: &[&str] = &[
        "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color", "color-mix",
    ];
    const LENGTH: &[&str] = &["calc", "min", "max", "clamp"];

    if COLOR.iter().any(|f| name.eq_ignore_ascii_case(f)) {
        ValueKind::Color
    } else if LENGTH.iter().any(|f| name.eq_ignore_ascii_case(f)) {
        ValueKind::Length
    } else {
        ValueKind::Any
    }
}

/// Whether a pattern accepting `accepts` takes this value.
///
/// A bare `0` counts as a number too, so `opacity-[0]` and `p-[0]` both work.
pub(crate) fn accepted_by(value: &ArbitraryValue, accepts: ValueKind) -> bool {
    if accepts.accepts(value.kind) {
        return true;
    }
    accepts == ValueKind::Number && value.kind == ValueKind::Length && value.value == "0"
}
