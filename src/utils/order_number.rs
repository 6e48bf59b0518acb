use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

static AUTO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ORD-\d{6}-").expect("valid order prefix regex"));
static AUTO_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ORD-\d{6}-\d{5,}$").expect("valid order number regex"));

/// 某年月的订单号前缀，例如 `ORD-202601-`
pub fn order_number_prefix(date: NaiveDate) -> String {
    format!("ORD-{}-", date.format("%Y%m"))
}

/// 取该月已用的最大流水号 +1 (五位，每月重新计数)。非数字的流水号不参与比较。
pub fn next_order_number<'a>(prefix: &str, existing: impl IntoIterator<Item = &'a str>) -> String {
    let last_seq = existing
        .into_iter()
        .filter_map(|n| n.strip_prefix(prefix))
        .filter(|seq| !seq.is_empty() && seq.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|seq| seq.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:05}", last_seq + 1)
}

/// 手动填写的订单号若占用自动编号的前缀，流水号必须是数字
pub fn is_valid_manual_order_number(number: &str) -> bool {
    !AUTO_PREFIX.is_match(number) || AUTO_NUMBER.is_match(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_number_of_month() {
        let prefix = order_number_prefix(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(prefix, "ORD-202601-");
        assert_eq!(next_order_number(&prefix, std::iter::empty::<&str>()), "ORD-202601-00001");
    }

    #[test]
    fn test_sequence_continues_from_highest() {
        assert_eq!(
            next_order_number("ORD-202601-", ["ORD-202601-00001"]),
            "ORD-202601-00002"
        );
        assert_eq!(
            next_order_number("ORD-202612-", ["ORD-202612-00099", "ORD-202612-00007"]),
            "ORD-202612-00100"
        );
    }

    #[test]
    fn test_non_numeric_suffix_is_skipped() {
        // 字典序上 "a" 排在数字之后
        assert_eq!(
            next_order_number("ORD-202610-", ["ORD-202610-a", "ORD-202610-00001"]),
            "ORD-202610-00002"
        );
        assert_eq!(
            next_order_number("ORD-202610-", ["ORD-202610-", "ORD-202610-+3"]),
            "ORD-202610-00001"
        );
    }

    #[test]
    fn test_manual_order_numbers() {
        assert!(is_valid_manual_order_number("PARTNER-7788"));
        assert!(is_valid_manual_order_number("ORD-202610-00042"));
        assert!(!is_valid_manual_order_number("ORD-202610-a"));
        assert!(!is_valid_manual_order_number("ORD-202610-12"));
    }
}
