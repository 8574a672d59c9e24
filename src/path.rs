use crate::types::{PathToken, ResolverError};
use nom::{
    branch::alt,
    bytes::complete::{escaped_transform, take_while1},
    character::complete::{char, digit1, none_of, one_of},
    combinator::{all_consuming, map, map_res, opt},
    multi::many0,
    sequence::{delimited, preceded},
    IResult, Parser,
};
use nom_language::error::VerboseError;

type Res<T, U> = IResult<T, U, VerboseError<T>>;

/// Characters that force a key into the quoted `['key']` form.
fn is_reserved(c: char) -> bool {
    matches!(c, '.' | '[' | ']' | '\'' | '"' | '(' | ')') || c.is_whitespace()
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.chars().any(is_reserved)
}

/// Extends a resolved path by one token.
///
/// Plain keys are joined with `.`, indices and quoted keys use brackets. A key
/// at an empty base gets no leading dot.
///
/// ## Example
///
/// ```rust
/// use jsonresolve::{append_token, PathToken};
///
/// assert_eq!(append_token("", &PathToken::Key("resources".into())), "resources");
/// assert_eq!(append_token("resources", &PathToken::Index(2)), "resources[2]");
/// assert_eq!(append_token("tags", &PathToken::Key("cost center".into())), "tags['cost center']");
/// ```
pub fn append_token(base: &str, token: &PathToken) -> String {
    let mut path = String::with_capacity(base.len() + 8);
    path.push_str(base);
    match token {
        PathToken::Index(index) => {
            path.push('[');
            path.push_str(&index.to_string());
            path.push(']');
        }
        PathToken::Key(key) if needs_quoting(key) => {
            path.push_str("['");
            for c in key.chars() {
                if c == '\\' || c == '\'' {
                    path.push('\\');
                }
                path.push(c);
            }
            path.push_str("']");
        }
        PathToken::Key(key) => {
            if !base.is_empty() {
                path.push('.');
            }
            path.push_str(key);
        }
    }
    path
}

/// Renders a full token list as a resolved path.
pub fn render_path(tokens: &[PathToken]) -> String {
    tokens
        .iter()
        .fold(String::new(), |path, token| append_token(&path, token))
}

/// Parses a resolved path (e.g. `resources[1].properties['display name']`) back into tokens.
///
/// ## Arguments
///
/// * `input` - The path to parse. The empty string is the root and parses to no tokens.
///
/// ## Returns
///
/// Returns the tokens if successful, or `ResolverError::MalformedPath` if the input is not
/// a path this crate could have produced.
pub fn parse_path(input: &str) -> Result<Vec<PathToken>, ResolverError> {
    if input.is_empty() {
        return Ok(Vec::new());
    }
    match all_consuming(path).parse(input) {
        Ok((_, tokens)) => Ok(tokens),
        Err(err) => Err(ResolverError::MalformedPath(format!("{}", err))),
    }
}

fn path(input: &str) -> Res<&str, Vec<PathToken>> {
    let (input, first) = alt((bracketed, plain_key)).parse(input)?;
    let (input, rest) = many0(alt((bracketed, preceded(char('.'), plain_key)))).parse(input)?;

    let mut tokens = Vec::with_capacity(rest.len() + 1);
    tokens.push(first);
    tokens.extend(rest);

    Ok((input, tokens))
}

fn plain_key(input: &str) -> Res<&str, PathToken> {
    map(take_while1(|c: char| !is_reserved(c)), |s: &str| {
        PathToken::Key(s.to_string())
    })
    .parse(input)
}

fn bracketed(input: &str) -> Res<&str, PathToken> {
    delimited(char('['), alt((index, quoted_key)), char(']')).parse(input)
}

fn index(input: &str) -> Res<&str, PathToken> {
    map_res(digit1, |s: &str| s.parse::<usize>().map(PathToken::Index)).parse(input)
}

fn quoted_key(input: &str) -> Res<&str, PathToken> {
    map(
        delimited(
            char('\''),
            opt(escaped_transform(none_of("\\'"), '\\', one_of("\\'"))),
            char('\''),
        ),
        |s: Option<String>| PathToken::Key(s.unwrap_or_default()),
    )
    .parse(input)
}
