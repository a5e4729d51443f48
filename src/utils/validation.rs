use chrono::NaiveDate;
use validator::Validate;

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

const MIN_AGE_YEARS: u32 = 18;

fn digits_of(input: &str) -> Vec<u32> {
    input.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Check-digit validation for a CPF, accepting masked ("529.982.247-25") and
/// bare ("52998224725") input. Sequences of a single repeated digit are
/// rejected outright: their checksum is trivially consistent but no such CPF
/// is ever issued.
pub fn is_valid_cpf(input: &str) -> bool {
    let digits = digits_of(input);
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let check = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (len as u32 + 1 - i as u32))
            .sum();
        (sum * 10) % 11 % 10
    };

    check(9) == digits[9] && check(10) == digits[10]
}

/// Display mask for a CPF: `529.982.247-25`. Format-only; input that is not
/// eleven digits long is returned untouched.
pub fn format_cpf(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return input.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11]
    )
}

/// Display mask for an RG: `12.345.678-9`. Format-only, no validation; input
/// outside the common 8-9 digit range is returned untouched.
pub fn format_rg(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if !(8..=9).contains(&digits.len()) {
        return input.to_string();
    }
    let (body, check) = digits.split_at(digits.len() - 1);
    let mut grouped = String::new();
    for (i, c) in body.chars().enumerate() {
        if i > 0 && (body.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{}-{}", grouped, check)
}

/// A full name carries at least two space-separated tokens.
pub fn is_full_name(input: &str) -> bool {
    input.split_whitespace().count() >= 2
}

/// Age gate: at least 18 whole years between birth date and `today`.
pub fn is_adult(birth_date: NaiveDate, today: NaiveDate) -> bool {
    match today.years_since(birth_date) {
        Some(age) => age >= MIN_AGE_YEARS,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_valid_cpf() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("52998224725"));
    }

    #[test]
    fn rejects_repeated_digit_cpf() {
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("00000000000"));
    }

    #[test]
    fn rejects_wrong_check_digit() {
        assert!(!is_valid_cpf("529.982.247-24"));
        assert!(!is_valid_cpf("52998224735"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf(""));
    }

    #[test]
    fn masks_cpf_and_rg() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        assert_eq!(format_cpf("not-a-cpf"), "not-a-cpf");
        assert_eq!(format_rg("123456789"), "12.345.678-9");
        assert_eq!(format_rg("12345678"), "1.234.567-8");
        assert_eq!(format_rg("12"), "12");
    }

    #[test]
    fn full_name_needs_two_tokens() {
        assert!(is_full_name("Maria Silva"));
        assert!(is_full_name("  João  da  Costa "));
        assert!(!is_full_name("Maria"));
        assert!(!is_full_name("   "));
    }

    #[test]
    fn adult_check_uses_calendar_years() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert!(is_adult(NaiveDate::from_ymd_opt(2008, 8, 7).unwrap(), today));
        assert!(!is_adult(NaiveDate::from_ymd_opt(2008, 8, 8).unwrap(), today));
        assert!(!is_adult(NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(), today));
    }
}
