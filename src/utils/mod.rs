//! ユーティリティモジュール

pub mod dialogs;
pub mod log_trace;
pub mod storage;

// 共通ヘルパー

/// 入力文字列を整数に変換（parseInt相当）
///
/// 前後の空白と先頭の符号を許し、先頭の数字列だけを読む。
/// 数字が1つもなければ None。
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::parse_int;

    #[test]
    fn parses_plain_and_signed() {
        assert_eq!(parse_int("250"), Some(250));
        assert_eq!(parse_int("  -150 "), Some(-150));
        assert_eq!(parse_int("+40"), Some(40));
    }

    #[test]
    fn ignores_trailing_garbage() {
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("1.9"), Some(1));
    }

    #[test]
    fn rejects_non_numbers() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int("- 5"), None);
        assert_eq!(parse_int("99999999999999999999999"), None);
    }
}
