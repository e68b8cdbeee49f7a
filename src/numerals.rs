//! Integer → Chinese numeral readings.
//!
//! Three readings are used by the drill: the regular counting form
//! (`二十五`, `一百零五`), the year form read digit by digit (`二零二零`), and
//! the plain digit-by-digit form used for ticket and room numbers.

use serde::{Deserialize, Serialize};

const DIGITS: [&str; 10] = ["零", "一", "二", "三", "四", "五", "六", "七", "八", "九"];
const NEGATIVE: &str = "负";

/// How a number is read aloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberFormat {
    Year,
    Regular,
    DigitByDigit,
}

/// Single digit 0–9. Anything else reads as the empty string.
pub fn digit_to_chinese(digit: i64) -> &'static str {
    match usize::try_from(digit) {
        Ok(d) if d < DIGITS.len() => DIGITS[d],
        _ => "",
    }
}

/// Regular counting reading, exact for |num| < 10 000. Larger magnitudes
/// fall back to the digit-by-digit reading.
pub fn number_to_chinese(num: i64) -> String {
    if num < 0 {
        return format!("{NEGATIVE}{}", read_regular(num.unsigned_abs()));
    }
    read_regular(num.unsigned_abs())
}

fn read_regular(num: u64) -> String {
    let digit = |d: u64| DIGITS[d as usize];
    match num {
        0..=9 => digit(num).to_string(),
        10 => "十".to_string(),
        11..=19 => format!("十{}", digit(num % 10)),
        20..=99 => {
            let mut out = format!("{}十", digit(num / 10));
            if num % 10 > 0 {
                out.push_str(digit(num % 10));
            }
            out
        }
        100..=999 => {
            let rest = num % 100;
            let mut out = format!("{}百", digit(num / 100));
            match rest {
                0 => {}
                1..=9 => {
                    out.push_str(DIGITS[0]);
                    out.push_str(digit(rest));
                }
                _ => out.push_str(&read_regular(rest)),
            }
            out
        }
        1000..=9999 => {
            let rest = num % 1000;
            let mut out = format!("{}千", digit(num / 1000));
            match rest {
                0 => {}
                1..=99 => {
                    out.push_str(DIGITS[0]);
                    out.push_str(&read_regular(rest));
                }
                _ => out.push_str(&read_regular(rest)),
            }
            out
        }
        _ => read_digits(num),
    }
}

fn read_digits(num: u64) -> String {
    num.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| DIGITS[d as usize])
        .collect()
}

/// Years are read digit by digit: 1990 → 一九九零.
pub fn year_to_chinese(year: i64) -> String {
    digits_to_chinese(year)
}

/// 1234 → 一二三四. Zero padding is a display concern and is not read.
pub fn digits_to_chinese(num: i64) -> String {
    if num < 0 {
        return format!("{NEGATIVE}{}", read_digits(num.unsigned_abs()));
    }
    read_digits(num.unsigned_abs())
}

pub fn format_for_speech(num: i64, format: NumberFormat) -> String {
    match format {
        NumberFormat::Year => year_to_chinese(num),
        NumberFormat::DigitByDigit => digits_to_chinese(num),
        NumberFormat::Regular => number_to_chinese(num),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits() {
        assert_eq!(digit_to_chinese(0), "零");
        assert_eq!(digit_to_chinese(7), "七");
        assert_eq!(digit_to_chinese(10), "");
        assert_eq!(digit_to_chinese(-1), "");
    }

    #[test]
    fn test_small_numbers() {
        assert_eq!(number_to_chinese(0), "零");
        assert_eq!(number_to_chinese(1), "一");
        assert_eq!(number_to_chinese(10), "十");
        assert_eq!(number_to_chinese(13), "十三");
        assert_eq!(number_to_chinese(20), "二十");
        assert_eq!(number_to_chinese(25), "二十五");
        assert_eq!(number_to_chinese(99), "九十九");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(number_to_chinese(100), "一百");
        assert_eq!(number_to_chinese(105), "一百零五");
        // remainders of ten or more recurse into the teens rule
        assert_eq!(number_to_chinese(110), "一百十");
        assert_eq!(number_to_chinese(115), "一百十五");
        assert_eq!(number_to_chinese(320), "三百二十");
        assert_eq!(number_to_chinese(999), "九百九十九");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(number_to_chinese(1000), "一千");
        assert_eq!(number_to_chinese(1005), "一千零五");
        assert_eq!(number_to_chinese(1010), "一千零十");
        assert_eq!(number_to_chinese(1050), "一千零五十");
        assert_eq!(number_to_chinese(1100), "一千一百");
        assert_eq!(number_to_chinese(1234), "一千二百三十四");
        assert_eq!(number_to_chinese(2008), "二千零八");
        assert_eq!(number_to_chinese(9999), "九千九百九十九");
    }

    #[test]
    fn test_out_of_range_and_negative() {
        assert_eq!(number_to_chinese(10000), "一零零零零");
        assert_eq!(number_to_chinese(-25), "负二十五");
        assert_eq!(digits_to_chinese(-12), "负一二");
    }

    #[test]
    fn test_year_and_digit_readings() {
        assert_eq!(year_to_chinese(2020), "二零二零");
        assert_eq!(year_to_chinese(1990), "一九九零");
        assert_eq!(digits_to_chinese(1234), "一二三四");
        assert_eq!(digits_to_chinese(0), "零");
    }

    #[test]
    fn test_format_dispatch() {
        assert_eq!(format_for_speech(1998, NumberFormat::Year), "一九九八");
        assert_eq!(format_for_speech(1998, NumberFormat::Regular), "一千九百九十八");
        assert_eq!(format_for_speech(305, NumberFormat::DigitByDigit), "三零五");
    }

    #[test]
    fn test_format_serde_tag() {
        let json = serde_json::to_string(&NumberFormat::DigitByDigit).unwrap();
        assert_eq!(json, "\"digit-by-digit\"");
    }
}
