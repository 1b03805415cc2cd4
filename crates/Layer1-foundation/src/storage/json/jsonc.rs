//! JSON-with-comments 전처리
//!
//! `//`, `/* */` 주석과 trailing comma를 제거한 뒤 `serde_json`으로 파싱한다.
//! 문자열 리터럴 내부는 건드리지 않는다.

use serde::de::DeserializeOwned;

/// JSON 주석 제거 (// 및 /* */)
pub fn strip_json_comments(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape_next = false;

    while let Some(c) = chars.next() {
        if escape_next {
            output.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' && in_string {
            output.push(c);
            escape_next = true;
            continue;
        }

        if c == '"' {
            in_string = !in_string;
            output.push(c);
            continue;
        }

        if !in_string && c == '/' {
            match chars.peek() {
                Some('/') => {
                    // 라인 주석 스킵
                    chars.next();
                    for c in chars.by_ref() {
                        if c == '\n' {
                            output.push(c);
                            break;
                        }
                    }
                    continue;
                }
                Some('*') => {
                    // 블록 주석 스킵
                    chars.next();
                    while let Some(c) = chars.next() {
                        if c == '*' && chars.peek() == Some(&'/') {
                            chars.next();
                            break;
                        }
                    }
                    continue;
                }
                _ => {}
            }
        }

        output.push(c);
    }

    output
}

/// `,` 바로 뒤(공백 제외)에 `]` 또는 `}`가 오면 그 `,`를 제거
pub fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &c) in chars.iter().enumerate() {
        if escape_next {
            output.push(c);
            escape_next = false;
            continue;
        }

        if in_string {
            if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            output.push(c);
            continue;
        }

        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
            if matches!(next, Some(']') | Some('}')) {
                continue;
            }
        }

        output.push(c);
    }

    output
}

/// JSONC 문자열을 타입으로 파싱
pub fn parse_jsonc<T: DeserializeOwned>(input: &str) -> serde_json::Result<T> {
    let cleaned = strip_trailing_commas(&strip_json_comments(input));
    serde_json::from_str(&cleaned)
}
