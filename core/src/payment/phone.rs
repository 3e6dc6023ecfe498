// duka/src/payment/phone.rs

//! Phone-number normalization for the mobile-money gateway.

use crate::error::{DukaError, DukaResult};

/// Normalizes a human-entered Safaricom number to the canonical
/// `254XXXXXXXXX` wire form.
///
/// Accepted shapes, after trimming and stripping a single leading `+`:
/// `254` followed by nine digits (returned unchanged), or `07`/`01`
/// followed by eight digits (the leading `0` becomes `254`). Anything
/// else is rejected locally, before any request is made.
pub fn format_phone_number(input: &str) -> DukaResult<String> {
  let phone = input.trim();
  let phone = phone.strip_prefix('+').unwrap_or(phone);

  if phone.chars().all(|c| c.is_ascii_digit()) {
    if phone.len() == 12 && phone.starts_with("254") {
      return Ok(phone.to_string());
    }
    if phone.len() == 10 && (phone.starts_with("07") || phone.starts_with("01")) {
      return Ok(format!("254{}", &phone[1..]));
    }
  }

  Err(DukaError::InvalidPhoneFormat {
    input: input.to_string(),
  })
}
