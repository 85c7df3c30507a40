use super::Record;
use super::error::DecodeError;

/// Decode a single logfmt line into a record
pub fn decode_line(line: &str) -> Result<Record, DecodeError> {
    let bytes = line.as_bytes();
    let mut record = Record::new();
    let mut pos = 0;

    loop {
        while pos < bytes.len() && bytes[pos] <= b' ' {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        let key_start = pos;
        pos = scan_bare(bytes, pos);
        if pos == key_start {
            return Err(DecodeError::UnexpectedChar {
                found: bytes[pos] as char,
                pos,
            });
        }
        let key = &line[key_start..pos];

        // bare key, no value
        if pos >= bytes.len() || bytes[pos] <= b' ' {
            record.insert(key, "");
            continue;
        }
        if bytes[pos] == b'"' {
            return Err(DecodeError::UnexpectedChar { found: '"', pos });
        }
        pos += 1;

        if pos >= bytes.len() || bytes[pos] <= b' ' {
            record.insert(key, "");
            continue;
        }

        if bytes[pos] == b'"' {
            let (value, next) = read_quoted(line, pos)?;
            pos = next;
            if let Some(found) = line[pos..].chars().next().filter(|c| *c > ' ') {
                return Err(DecodeError::UnexpectedChar { found, pos });
            }
            record.insert(key, value);
        } else {
            let value_start = pos;
            pos = scan_bare(bytes, pos);
            if pos < bytes.len() && bytes[pos] > b' ' {
                return Err(DecodeError::UnexpectedChar {
                    found: bytes[pos] as char,
                    pos,
                });
            }
            record.insert(key, &line[value_start..pos]);
        }
    }

    Ok(record)
}

/// Advance over a run of key/bare-value bytes
fn scan_bare(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos] > b' ' && bytes[pos] != b'=' && bytes[pos] != b'"' {
        pos += 1;
    }
    pos
}

/// Read the quoted value whose opening quote is at `start`.
///
/// Returns the unescaped value and the position just past the closing quote.
fn read_quoted(line: &str, start: usize) -> Result<(String, usize), DecodeError> {
    let body = start + 1;
    let mut value = String::new();
    let mut chars = line[body..].char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((value, body + i + 1)),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                match escaped {
                    '"' | '\\' | '/' => value.push(escaped),
                    'b' => value.push('\u{8}'),
                    'f' => value.push('\u{c}'),
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    'u' => {
                        let hex: String = chars.by_ref().take(4).map(|(_, h)| h).collect();
                        let code = Some(hex.as_str())
                            .filter(|h| h.len() == 4 && h.chars().all(|c| c.is_ascii_hexdigit()))
                            .and_then(|h| u32::from_str_radix(h, 16).ok())
                            .ok_or(DecodeError::InvalidEscape {
                                found: 'u',
                                pos: body + i,
                            })?;
                        value.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                    }
                    other => {
                        return Err(DecodeError::InvalidEscape {
                            found: other,
                            pos: body + i,
                        });
                    }
                }
            }
            c => value.push(c),
        }
    }

    Err(DecodeError::UnterminatedQuote { pos: start })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_line() {
        let record = decode_line(r#"key=value foo=bar baz="longer \"value" other=123"#).unwrap();

        assert_eq!(record.len(), 4);
        assert_eq!(record.get("key"), Some("value"));
        assert_eq!(record.get("foo"), Some("bar"));
        assert_eq!(record.get("baz"), Some("longer \"value"));
        assert_eq!(record.get("other"), Some("123"));
    }

    #[test]
    fn test_decode_unterminated_quote() {
        assert_eq!(
            decode_line(r#"key="unterminated quote"#),
            Err(DecodeError::UnterminatedQuote { pos: 4 })
        );
    }

    #[test]
    fn test_decode_bare_keys() {
        let record = decode_line("flag other= last=1").unwrap();
        assert_eq!(record.get("flag"), Some(""));
        assert_eq!(record.get("other"), Some(""));
        assert_eq!(record.get("last"), Some("1"));
    }

    #[test]
    fn test_decode_escapes() {
        let record = decode_line(r#"msg="a\tb\nc \\ é""#).unwrap();
        assert_eq!(record.get("msg"), Some("a\tb\nc \\ é"));

        assert!(matches!(
            decode_line(r#"msg="bad \q""#),
            Err(DecodeError::InvalidEscape { found: 'q', .. })
        ));
        assert!(matches!(
            decode_line(r#"msg="bad \u12""#),
            Err(DecodeError::InvalidEscape { found: 'u', .. })
        ));
        assert!(matches!(
            decode_line(r#"msg="bad \u+123""#),
            Err(DecodeError::InvalidEscape { found: 'u', .. })
        ));
        assert_eq!(
            decode_line(r#"msg="\u00e9t\u00C9""#).unwrap().get("msg"),
            Some("étÉ")
        );
    }

    #[test]
    fn test_decode_rejects_stray_characters() {
        assert_eq!(
            decode_line("=value"),
            Err(DecodeError::UnexpectedChar { found: '=', pos: 0 })
        );
        assert_eq!(
            decode_line("a=b=c"),
            Err(DecodeError::UnexpectedChar { found: '=', pos: 3 })
        );
        assert_eq!(
            decode_line(r#"a="b"c"#),
            Err(DecodeError::UnexpectedChar { found: 'c', pos: 5 })
        );
    }

    #[test]
    fn test_decode_empty_and_blank_lines() {
        assert!(decode_line("").unwrap().is_empty());
        assert!(decode_line(" \t ").unwrap().is_empty());
    }

    #[test]
    fn test_decode_unicode_values() {
        let record = decode_line("user=zoë city=\"São Paulo\"").unwrap();
        assert_eq!(record.get("user"), Some("zoë"));
        assert_eq!(record.get("city"), Some("São Paulo"));
    }
}
