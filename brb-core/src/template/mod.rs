//! Message templates shown to viewers.
//!
//! The syntax is the familiar double-brace one:
//!
//! - `{{ .Countdown }}` substitutes a field of the [`Output`] record
//! - `{{ if .TwitchFollowerCount }}...{{ else }}...{{ end }}` renders a section
//!   only when the field is non-zero
//! - `{{/* ... */}}` is a comment
//! - `{{- ` and ` -}}` trim whitespace on that side of the action
//!
//! A template is compiled once with [`Template::parse`]. Field names are
//! checked at that point, so rendering a compiled template cannot fail.

mod lexer;

use std::fmt;
use std::str::FromStr;
use brb_common::models::Output;
use crate::duration::format_duration;
use crate::Error;
use lexer::Token;

/// Shipped template when neither the flag nor the config file provides one.
pub const DEFAULT_MESSAGE: &str = "Stream will start again in {{ .Countdown }}\n{{ if .TwitchFollowerCount }}Twitch followers: {{ .TwitchFollowerCount }}{{ end }}";

/// Fields of [`Output`] a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Countdown,
    TwitchFollowerCount,
    TwitterFollowerCount,
}

impl Field {
    pub const ALL: [Field; 3] = [
        Field::Countdown,
        Field::TwitchFollowerCount,
        Field::TwitterFollowerCount,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Countdown => "Countdown",
            Field::TwitchFollowerCount => "TwitchFollowerCount",
            Field::TwitterFollowerCount => "TwitterFollowerCount",
        }
    }

    fn is_truthy(self, out: &Output) -> bool {
        match self {
            Field::Countdown => !out.countdown.is_zero(),
            Field::TwitchFollowerCount => out.followers.twitch.unwrap_or(0) != 0,
            Field::TwitterFollowerCount => out.followers.twitter.unwrap_or(0) != 0,
        }
    }

    fn write_value(self, out: &Output, buf: &mut String) {
        match self {
            Field::Countdown => buf.push_str(&format_duration(out.countdown)),
            Field::TwitchFollowerCount => buf.push_str(&out.followers.twitch.unwrap_or(0).to_string()),
            Field::TwitterFollowerCount => buf.push_str(&out.followers.twitter.unwrap_or(0).to_string()),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    /// Accepts `.Name`; the leading dot is required.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(name) = s.strip_prefix('.') else {
            return Err(Error::Template(format!("expected a field like .Countdown, got {s:?}")));
        };
        Field::ALL
            .into_iter()
            .find(|f| f.name() == name)
            .ok_or_else(|| {
                let known: Vec<String> = Field::ALL.iter().map(Field::to_string).collect();
                Error::Template(format!(
                    "unknown field {s} (available: {})",
                    known.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Value(Field),
    If {
        cond: Field,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },
}

/// What stopped `parse_block`.
enum BlockEnd {
    Eof,
    Else(usize),
    End(usize),
}

/// A compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(src: &str) -> Result<Self, Error> {
        let tokens = lexer::tokenize(src)?;
        let mut iter = tokens.into_iter();
        let (nodes, end) = parse_block(&mut iter)?;
        match end {
            BlockEnd::Eof => Ok(Self { nodes }),
            BlockEnd::Else(at) => Err(Error::Template(format!(
                "{{{{ else }}}} at offset {at} without a matching {{{{ if }}}}"
            ))),
            BlockEnd::End(at) => Err(Error::Template(format!(
                "{{{{ end }}}} at offset {at} without a matching {{{{ if }}}}"
            ))),
        }
    }

    /// Renders the record to plain text.
    pub fn render(&self, out: &Output) -> String {
        let mut buf = String::new();
        render_nodes(&self.nodes, out, &mut buf);
        buf
    }

    /// Same as [`render`](Self::render) with a leading carriage return, so a
    /// plain terminal overwrites the previous frame instead of appending.
    pub fn render_line(&self, out: &Output) -> String {
        let mut buf = String::from("\r");
        render_nodes(&self.nodes, out, &mut buf);
        buf
    }
}

impl FromStr for Template {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

fn parse_block<'a, I>(tokens: &mut I) -> Result<(Vec<Node>, BlockEnd), Error>
where
    I: Iterator<Item = Token<'a>>,
{
    let mut nodes = Vec::new();

    while let Some(token) = tokens.next() {
        let (body, offset) = match token {
            Token::Text(t) => {
                nodes.push(Node::Text(t.to_string()));
                continue;
            }
            Token::Comment => continue,
            Token::Action { body, offset } => (body, offset),
        };

        let mut words = body.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (None, _, _) => {
                return Err(Error::Template(format!("empty action at offset {offset}")));
            }
            (Some("else"), None, _) => return Ok((nodes, BlockEnd::Else(offset))),
            (Some("end"), None, _) => return Ok((nodes, BlockEnd::End(offset))),
            (Some("if"), Some(field), None) => {
                let cond: Field = field.parse()?;
                nodes.push(parse_if(tokens, cond, offset)?);
            }
            (Some("if"), None, _) => {
                return Err(Error::Template(format!("missing condition in {{{{ if }}}} at offset {offset}")));
            }
            (Some(field), None, _) if field.starts_with('.') => {
                nodes.push(Node::Value(field.parse()?));
            }
            _ => {
                return Err(Error::Template(format!(
                    "unsupported action {{{{ {body} }}}} at offset {offset}"
                )));
            }
        }
    }

    Ok((nodes, BlockEnd::Eof))
}

fn parse_if<'a, I>(tokens: &mut I, cond: Field, offset: usize) -> Result<Node, Error>
where
    I: Iterator<Item = Token<'a>>,
{
    let missing_end = || {
        Error::Template(format!(
            "missing {{{{ end }}}} for {{{{ if {cond} }}}} at offset {offset}"
        ))
    };

    let (then, end) = parse_block(tokens)?;
    let otherwise = match end {
        BlockEnd::End(_) => Vec::new(),
        BlockEnd::Eof => return Err(missing_end()),
        BlockEnd::Else(_) => {
            let (otherwise, end) = parse_block(tokens)?;
            match end {
                BlockEnd::End(_) => otherwise,
                BlockEnd::Eof => return Err(missing_end()),
                BlockEnd::Else(at) => {
                    return Err(Error::Template(format!(
                        "second {{{{ else }}}} at offset {at} in {{{{ if {cond} }}}}"
                    )));
                }
            }
        }
    };

    Ok(Node::If { cond, then, otherwise })
}

fn render_nodes(nodes: &[Node], out: &Output, buf: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => buf.push_str(t),
            Node::Value(field) => field.write_value(out, buf),
            Node::If { cond, then, otherwise } => {
                if cond.is_truthy(out) {
                    render_nodes(then, out, buf);
                } else {
                    render_nodes(otherwise, out, buf);
                }
            }
        }
    }
}
