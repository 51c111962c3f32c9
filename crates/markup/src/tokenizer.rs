//! Lenient inline-markup tokenizer.
//!
//! Tag and attribute names are restricted to ASCII `[A-Za-z0-9:_-]` and are
//! lowercased. A `<` that does not open a recognizable tag is kept as text, and
//! an unterminated tag at end of input is kept as text as well, so tokenizing
//! never loses characters. Doctypes and processing instructions are skipped.
use crate::entities::decode_entities;
use crate::types::{Attributes, Token};
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    let decoded = decode_entities(raw);
    if decoded.is_empty() {
        return;
    }
    // Adjacent text runs (e.g. around a stray '<') merge into one token.
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    // Slices are only cut at ASCII structural bytes, so every endpoint is a
    // UTF-8 char boundary.
    while i < len {
        if bytes[i] != b'<' {
            let end = memchr(b'<', &bytes[i..]).map_or(len, |rel| i + rel);
            push_text(&mut out, &input[i..end]);
            i = end;
            continue;
        }

        if input[i..].starts_with(COMMENT_START) {
            let body_start = i + COMMENT_START.len();
            match input[body_start..].find(COMMENT_END) {
                Some(rel) => {
                    out.push(Token::Comment(input[body_start..body_start + rel].to_string()));
                    i = body_start + rel + COMMENT_END.len();
                }
                None => {
                    out.push(Token::Comment(input[body_start..].to_string()));
                    i = len;
                }
            }
            continue;
        }

        let next = bytes.get(i + 1).copied();
        match next {
            Some(b'!') | Some(b'?') => {
                // Doctype / bogus comment: skip through '>'.
                i = memchr(b'>', &bytes[i..]).map_or(len, |rel| i + rel + 1);
            }
            Some(b'/') if bytes.get(i + 2).is_some_and(|b| b.is_ascii_alphabetic()) => {
                let name_start = i + 2;
                let mut j = name_start;
                while j < len && is_name_byte(bytes[j]) {
                    j += 1;
                }
                let name = input[name_start..j].to_ascii_lowercase();
                match memchr(b'>', &bytes[j..]) {
                    Some(rel) => {
                        out.push(Token::EndTag(name));
                        i = j + rel + 1;
                    }
                    None => {
                        push_text(&mut out, &input[i..]);
                        i = len;
                    }
                }
            }
            Some(b) if b.is_ascii_alphabetic() => match scan_start_tag(input, i) {
                Some((token, end)) => {
                    log::trace!(target: "markup.tokenizer", "start tag: {token:?}");
                    out.push(token);
                    i = end;
                }
                None => {
                    push_text(&mut out, &input[i..]);
                    i = len;
                }
            },
            _ => {
                push_text(&mut out, "<");
                i += 1;
            }
        }
    }

    out
}

/// Scan a start tag beginning at `<`. Returns the token and the index just past
/// `>`, or `None` when input ends before the tag is closed.
fn scan_start_tag(input: &str, lt: usize) -> Option<(Token, usize)> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    let name_start = lt + 1;
    let mut k = name_start;
    while k < len && is_name_byte(bytes[k]) {
        k += 1;
    }
    let name = input[name_start..k].to_ascii_lowercase();
    let mut attributes: Attributes = Vec::new();
    let mut self_closing = false;

    let skip_ws = |k: &mut usize| {
        while *k < len && bytes[*k].is_ascii_whitespace() {
            *k += 1;
        }
    };

    loop {
        skip_ws(&mut k);
        if k >= len {
            return None;
        }
        match bytes[k] {
            b'>' => {
                k += 1;
                break;
            }
            b'/' => {
                if bytes.get(k + 1) == Some(&b'>') {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            _ => {}
        }

        let attr_start = k;
        while k < len && is_name_byte(bytes[k]) {
            k += 1;
        }
        if attr_start == k {
            // Junk byte inside the tag; step over the whole char.
            k += input[k..].chars().next().map_or(1, char::len_utf8);
            continue;
        }
        let attr_name = input[attr_start..k].to_ascii_lowercase();

        skip_ws(&mut k);
        let value = if k < len && bytes[k] == b'=' {
            k += 1;
            skip_ws(&mut k);
            if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                let quote = bytes[k];
                let v_start = k + 1;
                let rel = memchr(quote, &bytes[v_start..])?;
                k = v_start + rel + 1;
                Some(decode_entities(&input[v_start..v_start + rel]))
            } else {
                let v_start = k;
                while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                    if bytes[k] == b'/' && bytes.get(k + 1) == Some(&b'>') {
                        break;
                    }
                    k += 1;
                }
                Some(decode_entities(&input[v_start..k]))
            }
        } else {
            None
        };
        attributes.push((attr_name, value));
    }

    if is_void_element(&name) {
        self_closing = true;
    }

    Some((
        Token::StartTag {
            name,
            attributes,
            self_closing,
        },
        k,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(name: &str, attributes: Attributes, self_closing: bool) -> Token {
        Token::StartTag {
            name: name.to_string(),
            attributes,
            self_closing,
        }
    }

    #[test]
    fn tokenizes_inline_markup() {
        let tokens = tokenize("<b>Lorem ipsum</b> dolor");
        assert_eq!(
            tokens,
            vec![
                start("b", Vec::new(), false),
                Token::Text("Lorem ipsum".to_string()),
                Token::EndTag("b".to_string()),
                Token::Text(" dolor".to_string()),
            ]
        );
    }

    #[test]
    fn attributes_are_lowercased_and_decoded() {
        let tokens = tokenize(r##"<A HREF="#" Class='more &amp; less' hidden data-x=1>"##);
        assert_eq!(
            tokens,
            vec![start(
                "a",
                vec![
                    ("href".to_string(), Some("#".to_string())),
                    ("class".to_string(), Some("more & less".to_string())),
                    ("hidden".to_string(), None),
                    ("data-x".to_string(), Some("1".to_string())),
                ],
                false,
            )]
        );
    }

    #[test]
    fn void_and_self_closing_tags() {
        let tokens = tokenize("a<br>b<span/>");
        assert_eq!(
            tokens,
            vec![
                Token::Text("a".to_string()),
                start("br", Vec::new(), true),
                Token::Text("b".to_string()),
                start("span", Vec::new(), true),
            ]
        );
    }

    #[test]
    fn stray_angle_brackets_stay_text() {
        assert_eq!(
            tokenize("1 < 2 <3"),
            vec![Token::Text("1 < 2 <3".to_string())]
        );
        assert_eq!(
            tokenize("x <b unterminated"),
            vec![Token::Text("x <b unterminated".to_string())]
        );
    }

    #[test]
    fn comments_and_doctype() {
        assert_eq!(
            tokenize("<!doctype html><!-- hi -->t<!-- open"),
            vec![
                Token::Comment(" hi ".to_string()),
                Token::Text("t".to_string()),
                Token::Comment(" open".to_string()),
            ]
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            tokenize("<i>naïve 😀</i>"),
            vec![
                start("i", Vec::new(), false),
                Token::Text("naïve 😀".to_string()),
                Token::EndTag("i".to_string()),
            ]
        );
    }
}
