// File: brb-core/src/template/lexer.rs
//
// Splits template source into literal text and `{{ ... }}` actions.
// Trim markers (`{{- ` and ` -}}`) are applied here so the parser only sees
// the final text.

use crate::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    /// Action body with delimiters and trim markers removed, plus its byte offset.
    Action { body: &'a str, offset: usize },
    Comment,
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

pub(crate) fn tokenize(src: &str) -> Result<Vec<Token<'_>>, Error> {
    let mut tokens = Vec::new();
    let mut pos = 0;
    let mut trim_next_text = false;

    loop {
        let rest = &src[pos..];
        let Some(open_rel) = rest.find(OPEN) else {
            push_text(&mut tokens, rest, trim_next_text, false);
            break;
        };

        let open = pos + open_rel;
        let mut body_start = open + OPEN.len();
        let trim_left = has_left_trim(&src[body_start..]);
        if trim_left {
            body_start += 1;
        }
        push_text(&mut tokens, &src[pos..open], trim_next_text, trim_left);

        let close = find_close(src, body_start)
            .ok_or_else(|| Error::Template(format!("unclosed action at offset {open}")))?;

        let mut body = &src[body_start..close];
        trim_next_text = has_right_trim(body);
        if trim_next_text {
            body = &body[..body.len() - 1];
        }

        let trimmed = body.trim();
        if trimmed.starts_with("/*") {
            if !trimmed.ends_with("*/") || trimmed.len() < 4 {
                return Err(Error::Template(format!("unclosed comment at offset {open}")));
            }
            tokens.push(Token::Comment);
        } else {
            tokens.push(Token::Action { body: trimmed, offset: open });
        }

        pos = close + CLOSE.len();
    }

    Ok(tokens)
}

/// `{{- ` needs whitespace after the dash, otherwise it is part of the action.
fn has_left_trim(after_open: &str) -> bool {
    let mut chars = after_open.chars();
    chars.next() == Some('-') && chars.next().is_some_and(char::is_whitespace)
}

/// ` -}}` needs whitespace before the dash.
fn has_right_trim(body: &str) -> bool {
    body.ends_with('-')
        && body[..body.len() - 1]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
}

/// Finds the `}}` closing an action. Comment bodies may contain braces, so
/// for those the search starts after the `*/`.
fn find_close(src: &str, body_start: usize) -> Option<usize> {
    let body = &src[body_start..];
    let lead = body.len() - body.trim_start().len();
    let search_from = if body.trim_start().starts_with("/*") {
        let comment_start = body_start + lead + 2;
        comment_start + src[comment_start..].find("*/")? + 2
    } else {
        body_start
    };
    src[search_from..].find(CLOSE).map(|i| search_from + i)
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start();
    }
    if trim_end {
        text = text.trim_end();
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_actions_are_split() {
        let tokens = tokenize("a {{ .Countdown }} b").expect("lexes");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a "),
                Token::Action { body: ".Countdown", offset: 2 },
                Token::Text(" b"),
            ]
        );
    }

    #[test]
    fn test_trim_markers_eat_whitespace() {
        let tokens = tokenize("a  \n{{- .Countdown -}}\n  b").expect("lexes");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a"),
                Token::Action { body: ".Countdown", offset: 4 },
                Token::Text("b"),
            ]
        );
    }

    #[test]
    fn test_comment_may_contain_braces() {
        let tokens = tokenize("{{/* }} */}}x").expect("lexes");
        assert_eq!(tokens, vec![Token::Comment, Token::Text("x")]);
    }

    #[test]
    fn test_unclosed_action_is_an_error() {
        assert!(tokenize("left {{ .Countdown").is_err());
        assert!(tokenize("{{/* never closed }}").is_err());
    }
}
