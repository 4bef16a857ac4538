//! LIKE pattern translation into Lucene regular expressions and query strings.

/// Characters with a meaning in Lucene regular expressions.
const REGEX_RESERVED: &[char] = &[
    '.', '?', '+', '*', '|', '{', '}', '[', ']', '(', ')', '"', '\\', '#', '@', '&', '<', '>',
    '~',
];

/// Characters with a meaning in the query string syntax.
const QUERY_STRING_RESERVED: &[char] = &[
    '+', '-', '=', '&', '|', '>', '<', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*',
    '?', ':', '\\', '/',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Literal(char),
    /// A character preceded by the escape character.
    Escaped(char),
    Wildcard,
    SingleChar,
}

fn scan(pattern: &str, escape: char, wildcard: char, single_char: char) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut chars = pattern.chars();
    while let Some(ch) = chars.next() {
        if ch == escape {
            // a trailing escape has nothing to escape and is dropped
            if let Some(next) = chars.next() {
                pieces.push(Piece::Escaped(next));
            }
        } else if ch == wildcard {
            pieces.push(Piece::Wildcard);
        } else if ch == single_char {
            pieces.push(Piece::SingleChar);
        } else {
            pieces.push(Piece::Literal(ch));
        }
    }
    pieces
}

fn push_escaped(out: &mut String, ch: char, reserved: &[char]) {
    if reserved.contains(&ch) {
        out.push('\\');
    }
    out.push(ch);
}

/// Converts a LIKE pattern into a regular expression for a `regexp` query.
///
/// The single-character wildcard is matched literally.
pub fn convert_to_regex(pattern: &str, escape: char, wildcard: char, single_char: char) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for piece in scan(pattern, escape, wildcard, single_char) {
        match piece {
            Piece::Wildcard => out.push_str(".*"),
            Piece::SingleChar => push_escaped(&mut out, single_char, REGEX_RESERVED),
            Piece::Escaped(ch) => {
                out.push('\\');
                out.push(ch);
            }
            Piece::Literal(ch) => push_escaped(&mut out, ch, REGEX_RESERVED),
        }
    }
    out
}

/// Converts a LIKE pattern into `query_string` syntax, where `*` and `?` are
/// the native wildcards.
pub fn convert_to_query_string(
    pattern: &str,
    escape: char,
    wildcard: char,
    single_char: char,
) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for piece in scan(pattern, escape, wildcard, single_char) {
        match piece {
            Piece::Wildcard => out.push('*'),
            Piece::SingleChar => out.push('?'),
            Piece::Escaped(ch) => {
                out.push('\\');
                out.push(ch);
            }
            Piece::Literal(ch) => push_escaped(&mut out, ch, QUERY_STRING_RESERVED),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(pattern: &str) -> String {
        convert_to_regex(pattern, '!', '*', '.')
    }

    fn query_string(pattern: &str) -> String {
        convert_to_query_string(pattern, '!', '*', '.')
    }

    #[test]
    fn test_regex_conversion() {
        assert_eq!(regex("BroadWay*"), "BroadWay.*");
        assert_eq!(regex("broad.ay"), "broad\\.ay");
        assert_eq!(regex("broadway!"), "broadway");
        assert_eq!(regex("broadway!!"), "broadway\\!");
        assert_eq!(regex("!*star"), "\\*star");
        assert_eq!(regex("a+b"), "a\\+b");
    }

    #[test]
    fn test_query_string_conversion() {
        assert_eq!(query_string("broad.ay"), "broad?ay");
        assert_eq!(query_string("broadway."), "broadway?");
        assert_eq!(query_string("BroadWay*"), "BroadWay*");
        assert_eq!(query_string("broadway!"), "broadway");
        assert_eq!(query_string("broadway!!"), "broadway\\!");
        assert_eq!(query_string("a:b"), "a\\:b");
    }

    #[test]
    fn test_sql_style_wildcards() {
        assert_eq!(convert_to_regex("ab%c_", '\\', '%', '_'), "ab.*c_");
        assert_eq!(convert_to_query_string("ab%c_", '\\', '%', '_'), "ab*c?");
        assert_eq!(convert_to_query_string("100\\%", '\\', '%', '_'), "100\\%");
        assert_eq!(convert_to_query_string("a.b", '\\', '%', '_'), "a.b");
    }
}
