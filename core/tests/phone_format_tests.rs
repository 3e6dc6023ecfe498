// tests/phone_format_tests.rs

use duka::{format_phone_number, DukaError};

#[test]
fn local_07_numbers_gain_the_country_code() {
  assert_eq!(format_phone_number("0712345678").unwrap(), "254712345678");
}

#[test]
fn local_01_numbers_gain_the_country_code() {
  assert_eq!(format_phone_number("0112345678").unwrap(), "254112345678");
}

#[test]
fn canonical_numbers_pass_through_unchanged() {
  assert_eq!(format_phone_number("254712345678").unwrap(), "254712345678");
}

#[test]
fn a_single_leading_plus_is_stripped() {
  assert_eq!(format_phone_number("+254712345678").unwrap(), "254712345678");
}

#[test]
fn surrounding_whitespace_is_trimmed() {
  assert_eq!(format_phone_number("  0712345678\n").unwrap(), "254712345678");
}

#[test]
fn short_input_is_rejected() {
  let err = format_phone_number("12345").unwrap_err();
  match err {
    DukaError::InvalidPhoneFormat { input } => assert_eq!(input, "12345"),
    other => panic!("expected InvalidPhoneFormat, got {other:?}"),
  }
}

#[test]
fn wrong_prefixes_and_lengths_are_rejected() {
  for input in [
    "0812345678",    // unknown local prefix
    "25471234567",   // 254 with only eight digits
    "2547123456789", // 254 with ten digits
    "071234567",     // 07 with only seven digits
    "07123456789",   // 07 with nine digits
    "07a2345678",    // non-digit in the body
    "++254712345678",
    "",
  ] {
    assert!(
      matches!(
        format_phone_number(input),
        Err(DukaError::InvalidPhoneFormat { .. })
      ),
      "expected rejection for {input:?}"
    );
  }
}
