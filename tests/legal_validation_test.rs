use chrono::NaiveDate;

use rh_backend::utils::validation::{
    format_cpf, format_rg, is_adult, is_full_name, is_valid_cpf,
};

#[test]
fn cpf_checksum_rules() {
    assert!(is_valid_cpf("529.982.247-25"));
    assert!(is_valid_cpf("52998224725"));

    // Repeated digits have a trivially consistent checksum but are invalid.
    assert!(!is_valid_cpf("111.111.111-11"));
    assert!(!is_valid_cpf("99999999999"));

    // Wrong check digit.
    assert!(!is_valid_cpf("529.982.247-26"));
}

#[test]
fn masks_are_format_only() {
    assert_eq!(format_cpf("52998224725"), "529.982.247-25");
    // Masking never validates: a checksum-invalid CPF is still formatted.
    assert_eq!(format_cpf("11111111111"), "111.111.111-11");
    assert_eq!(format_rg("123456789"), "12.345.678-9");
}

#[test]
fn name_and_age_gates() {
    assert!(is_full_name("Ana Souza"));
    assert!(!is_full_name("Ana"));

    let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
    let just_18 = NaiveDate::from_ymd_opt(2008, 8, 7).unwrap();
    let almost_18 = NaiveDate::from_ymd_opt(2008, 8, 8).unwrap();
    assert!(is_adult(just_18, today));
    assert!(!is_adult(almost_18, today));
}
