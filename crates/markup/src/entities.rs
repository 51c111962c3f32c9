/// Decode a small, explicitly limited subset of character references.
///
/// Contract:
/// - Named references: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// - Numeric references only when well-formed and semicolon-terminated:
///   `&#39;` (decimal) and `&#x1F4A9;` (hex).
/// - Invalid scalar values, missing semicolons and unknown names pass through
///   unchanged.
pub fn decode_entities(s: &str) -> String {
    const NAMED: &[(&[u8], char)] = &[
        (b"&amp;", '&'),
        (b"&lt;", '<'),
        (b"&gt;", '>'),
        (b"&quot;", '"'),
        (b"&apos;", '\''),
        (b"&nbsp;", '\u{00A0}'),
    ];
    const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
    const MAX_DEC_DIGITS: usize = 7; // 1114111

    // Returns the index of the terminating `;` for a bounded digit run.
    fn scan_digits(bytes: &[u8], start: usize, max_digits: usize, hex: bool) -> Option<usize> {
        let mut j = start;
        while j < bytes.len() && j - start <= max_digits {
            let b = bytes[j];
            if b == b';' {
                return (j > start).then_some(j);
            }
            let ok = if hex {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            };
            if !ok {
                return None;
            }
            j += 1;
        }
        None
    }

    let bytes = s.as_bytes();
    let Some(first_amp) = memchr::memchr(b'&', bytes) else {
        return s.to_string();
    };

    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..first_amp]);
    let mut i = first_amp;
    let mut copy_start = first_amp;

    while i < bytes.len() {
        if bytes[i] != b'&' {
            i += 1;
            continue;
        }
        out.push_str(&s[copy_start..i]);

        if let Some((pat, ch)) = NAMED
            .iter()
            .find(|(pat, _)| bytes.get(i..i + pat.len()) == Some(*pat))
        {
            out.push(*ch);
            i += pat.len();
            copy_start = i;
            continue;
        }

        let numeric = match bytes.get(i + 1..i + 3) {
            Some([b'#', b'x' | b'X']) => Some((i + 3, 16, MAX_HEX_DIGITS)),
            Some([b'#', _]) => Some((i + 2, 10, MAX_DEC_DIGITS)),
            _ => None,
        };
        if let Some((digits_start, radix, max_digits)) = numeric {
            if let Some(end) = scan_digits(bytes, digits_start, max_digits, radix == 16) {
                let decoded = u32::from_str_radix(&s[digits_start..end], radix)
                    .ok()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) => out.push(ch),
                    None => out.push_str(&s[i..=end]),
                }
                i = end + 1;
                copy_start = i;
                continue;
            }
        }

        // Not a reference we understand: keep the '&' literally.
        out.push('&');
        i += 1;
        copy_start = i;
    }

    if copy_start < bytes.len() {
        out.push_str(&s[copy_start..]);
    }
    out
}

/// Escape text data for serialization (`&`, `<`, `>`; NBSP as `&nbsp;`).
pub fn escape_text(s: &str) -> String {
    escape(s, false)
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape(s, true)
}

fn escape(s: &str, attr: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_preserves_utf8() {
        assert_eq!(decode_entities("120×32"), "120×32");
    }

    #[test]
    fn decode_named_references() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("l&apos;homme&nbsp;qui"), "l'homme\u{00A0}qui");
    }

    #[test]
    fn decode_numeric_references() {
        assert_eq!(decode_entities("C&#39;est"), "C'est");
        assert_eq!(decode_entities("&#x1F600;!"), "😀!");
        assert_eq!(decode_entities("&#X41;"), "A");
    }

    #[test]
    fn malformed_references_pass_through() {
        assert_eq!(decode_entities("&unknown; &#; &#12 &"), "&unknown; &#; &#12 &");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#99999999;"), "&#99999999;");
    }

    #[test]
    fn escape_round_trips_through_decode() {
        let raw = "a < b & \"c\" \u{00A0}";
        assert_eq!(decode_entities(&escape_attr(raw)), raw);
        assert_eq!(escape_text(raw), "a &lt; b &amp; \"c\" &nbsp;");
    }
}
