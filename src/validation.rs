//! Format and range checks for everything the customer types in.
//!
//! Every check trims its input first and returns the trimmed value (or the
//! parsed amount) on success, so callers never have to trim twice.

use std::fmt::Display;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

pub const MIN_NAME_LENGTH: usize = 2;
pub const ACCOUNT_NUMBER_LENGTH: RangeInclusive<usize> = 6..=12;
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
/// Integer digits of [`MAX_AMOUNT`].
const MAX_AMOUNT_DIGITS: i64 = 7;
/// Most decimal places a `Decimal` holds.
pub const MAX_AMOUNT_SCALE: u32 = 28;

static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-ZáéíóúÁÉÍÓÚñÑ\s]+$").expect("Invalid name regex pattern")
});

static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sign>[+-])?(?P<int>[0-9]*)(?:\.(?P<frac>[0-9]*))?(?:[eE](?P<exp>[+-]?[0-9]+))?$")
        .expect("Invalid amount regex pattern")
});

static INFINITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<sign>[+-])?inf(?:inity)?$").expect("Invalid infinity regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Surname,
    Name,
    AccountNumber,
    Amount,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Field::Surname => "Surname",
            Field::Name => "Name",
            Field::AccountNumber => "Account number",
            Field::Amount => "Amount",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    Empty(Field),
    #[error("{0} may only contain letters and spaces")]
    NotLetters(Field),
    #[error("{0} must be at least {min} characters long", min = MIN_NAME_LENGTH)]
    TooShort(Field),
    #[error("Account number may only contain digits")]
    NotDigits,
    #[error(
        "Account number must be between {} and {} digits",
        ACCOUNT_NUMBER_LENGTH.start(),
        ACCOUNT_NUMBER_LENGTH.end()
    )]
    AccountNumberLength,
    #[error("Amount must be greater than zero")]
    NotPositive,
    #[error("Amount cannot exceed $1,000,000")]
    TooLarge,
    #[error("Amount cannot have more than {} decimal places", MAX_AMOUNT_SCALE)]
    TooPrecise,
    #[error("Invalid amount format. Use digits with a decimal point")]
    InvalidFormat,
}

pub fn validate_surname(input: &str) -> Result<String, ValidationError> {
    validate_name_field(input, Field::Surname)
}

pub fn validate_holder_name(input: &str) -> Result<String, ValidationError> {
    validate_name_field(input, Field::Name)
}

fn validate_name_field(input: &str, field: Field) -> Result<String, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }

    if !NAME_PATTERN.is_match(trimmed) {
        return Err(ValidationError::NotLetters(field));
    }

    if trimmed.chars().count() < MIN_NAME_LENGTH {
        return Err(ValidationError::TooShort(field));
    }

    Ok(trimmed.to_owned())
}

pub fn validate_account_number(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty(Field::AccountNumber));
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::NotDigits);
    }

    if !ACCOUNT_NUMBER_LENGTH.contains(&trimmed.len()) {
        return Err(ValidationError::AccountNumberLength);
    }

    Ok(trimmed.to_owned())
}

/// Parses a strictly positive amount no larger than [`MAX_AMOUNT`].
///
/// Any well-formed number gets a range verdict, however large or small, and
/// an accepted amount is exactly the value written.
pub fn validate_amount(input: &str) -> Result<Decimal, ValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty(Field::Amount));
    }

    if let Some(infinity) = INFINITY_PATTERN.captures(trimmed) {
        return Err(match infinity.name("sign").map(|m| m.as_str()) {
            Some("-") => ValidationError::NotPositive,
            _ => ValidationError::TooLarge,
        });
    }

    let number = AMOUNT_PATTERN
        .captures(trimmed)
        .ok_or(ValidationError::InvalidFormat)?;

    let integer = number.name("int").map_or("", |m| m.as_str());
    let fraction = number.name("frac").map_or("", |m| m.as_str());

    if integer.is_empty() && fraction.is_empty() {
        return Err(ValidationError::InvalidFormat);
    }

    let exponent = number.name("exp").map_or(0, |m| {
        let text = m.as_str();
        text.parse::<i64>()
            .unwrap_or(if text.starts_with('-') { i64::MIN } else { i64::MAX })
    });

    let digits = format!("{integer}{fraction}");
    let significant = digits.trim_start_matches('0');

    if significant.is_empty() || number.name("sign").is_some_and(|m| m.as_str() == "-") {
        return Err(ValidationError::NotPositive);
    }

    // value = significant * 10^-scale
    let scale = i64::try_from(fraction.len())
        .unwrap_or(i64::MAX)
        .saturating_sub(exponent);
    let integer_digits = i64::try_from(significant.len())
        .unwrap_or(i64::MAX)
        .saturating_sub(scale);

    if integer_digits > MAX_AMOUNT_DIGITS
        || (integer_digits == MAX_AMOUNT_DIGITS && significant.trim_end_matches('0') != "1")
    {
        return Err(ValidationError::TooLarge);
    }

    let amount = exact_decimal(significant, scale)?;

    if amount > MAX_AMOUNT {
        return Err(ValidationError::TooLarge);
    }

    Ok(amount)
}

/// Builds `digits * 10^-scale` without rounding. Trailing zeros are dropped
/// only when the value would not fit otherwise.
fn exact_decimal(digits: &str, scale: i64) -> Result<Decimal, ValidationError> {
    let max_scale = i64::from(MAX_AMOUNT_SCALE);
    let mut digits = digits.to_owned();
    let mut scale = scale;

    while scale > 0
        && digits.ends_with('0')
        && (scale > max_scale || digits.len() > MAX_AMOUNT_SCALE as usize)
    {
        digits.pop();
        scale -= 1;
    }

    if scale < 0 {
        digits.push_str(&"0".repeat(scale.unsigned_abs() as usize));
        scale = 0;
    }

    let scale = u32::try_from(scale)
        .ok()
        .filter(|scale| *scale <= MAX_AMOUNT_SCALE)
        .ok_or(ValidationError::TooPrecise)?;
    let mantissa: i128 = digits.parse().map_err(|_| ValidationError::TooPrecise)?;

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| ValidationError::TooPrecise)
}

#[cfg(test)]
mod test {
    use super::*;
    use assert2::{assert, check};
    use proptest::prelude::*;

    #[test]
    fn test_name_fields_reject_empty_and_blank() {
        check!(validate_surname("") == Err(ValidationError::Empty(Field::Surname)));
        check!(validate_surname("   ") == Err(ValidationError::Empty(Field::Surname)));
        check!(validate_holder_name("\t") == Err(ValidationError::Empty(Field::Name)));
    }

    #[test]
    fn test_name_fields_reject_digits_and_symbols() {
        check!(validate_surname("Smith2") == Err(ValidationError::NotLetters(Field::Surname)));
        check!(validate_holder_name("Ann-Marie") == Err(ValidationError::NotLetters(Field::Name)));
        check!(validate_holder_name("42") == Err(ValidationError::NotLetters(Field::Name)));
    }

    #[test]
    fn test_name_fields_reject_single_character() {
        check!(validate_surname("a") == Err(ValidationError::TooShort(Field::Surname)));
        check!(validate_holder_name(" Ñ ") == Err(ValidationError::TooShort(Field::Name)));
    }

    #[test]
    fn test_name_fields_accept_accented_letters_and_trim() {
        check!(validate_holder_name("José María") == Ok("José María".to_owned()));
        check!(validate_surname("  Muñoz Ibáñez ") == Ok("Muñoz Ibáñez".to_owned()));
        check!(validate_surname("Li") == Ok("Li".to_owned()));
    }

    #[test]
    fn test_account_number_length_bounds() {
        check!(validate_account_number("12345") == Err(ValidationError::AccountNumberLength));
        check!(validate_account_number("123456") == Ok("123456".to_owned()));
        check!(validate_account_number("123456789012") == Ok("123456789012".to_owned()));
        check!(
            validate_account_number("1234567890123") == Err(ValidationError::AccountNumberLength)
        );
    }

    #[test]
    fn test_account_number_rejects_non_digits() {
        check!(validate_account_number("") == Err(ValidationError::Empty(Field::AccountNumber)));
        check!(validate_account_number("ACC123456") == Err(ValidationError::NotDigits));
        check!(validate_account_number("123-456") == Err(ValidationError::NotDigits));
        check!(validate_account_number("123 456") == Err(ValidationError::NotDigits));
        check!(validate_account_number(" 987654 ") == Ok("987654".to_owned()));
    }

    #[test]
    fn test_account_number_accepts_ascii_digits_only() {
        check!(validate_account_number("١٢٣٤٥٦") == Err(ValidationError::NotDigits));
        check!(validate_account_number("１２３４５６") == Err(ValidationError::NotDigits));
    }

    #[test]
    fn test_length_messages_follow_limits() {
        check!(
            ValidationError::TooShort(Field::Name).to_string()
                == format!("Name must be at least {MIN_NAME_LENGTH} characters long")
        );
        check!(
            ValidationError::AccountNumberLength.to_string()
                == "Account number must be between 6 and 12 digits"
        );
    }

    #[test]
    fn test_amount_failures_have_distinct_messages() {
        let messages = [
            validate_amount(""),
            validate_amount("0"),
            validate_amount("1000000.01"),
            validate_amount("ten"),
        ]
        .map(|result| result.unwrap_err().to_string());

        assert!(messages[0] == "Amount cannot be empty");
        assert!(messages[1] == "Amount must be greater than zero");
        assert!(messages[2] == "Amount cannot exceed $1,000,000");
        assert!(messages[3] == "Invalid amount format. Use digits with a decimal point");
    }

    #[test]
    fn test_amount_bounds() {
        check!(validate_amount("0.01") == Ok(Decimal::new(1, 2)));
        check!(validate_amount("1000000") == Ok(MAX_AMOUNT));
        check!(validate_amount("-5") == Err(ValidationError::NotPositive));
        check!(validate_amount("0.00") == Err(ValidationError::NotPositive));
    }

    #[test]
    fn test_amount_accepts_surrounding_whitespace_and_exponents() {
        check!(validate_amount("  50.25 ") == Ok(Decimal::new(5025, 2)));
        check!(validate_amount("1e3") == Ok(Decimal::new(1000, 0)));
        check!(validate_amount("1,000") == Err(ValidationError::InvalidFormat));
        check!(validate_amount("+.5") == Ok(Decimal::new(5, 1)));
        check!(validate_amount("5.") == Ok(Decimal::new(5, 0)));
    }

    #[test]
    fn test_huge_numbers_get_range_verdicts() {
        check!(validate_amount("1e30") == Err(ValidationError::TooLarge));
        check!(validate_amount("99999999999999999999999999999999") == Err(ValidationError::TooLarge));
        check!(validate_amount("1000000.00000000000000000000000001") == Err(ValidationError::TooLarge));
        check!(validate_amount("1e99999999999999999999") == Err(ValidationError::TooLarge));
        check!(validate_amount("Infinity") == Err(ValidationError::TooLarge));
        check!(validate_amount("-1e30") == Err(ValidationError::NotPositive));
        check!(validate_amount("-inf") == Err(ValidationError::NotPositive));
    }

    #[test]
    fn test_non_numbers_are_invalid_format() {
        for text in ["NaN", ".", "+", "e5", "1e", "1.2.3", "--1", "١٢"] {
            check!(validate_amount(text) == Err(ValidationError::InvalidFormat), "{text:?}");
        }
    }

    #[test]
    fn test_amounts_are_never_rounded() {
        check!(
            validate_amount("0.1000000000000000000000000000001") == Err(ValidationError::TooPrecise)
        );
        check!(validate_amount("1e-30") == Err(ValidationError::TooPrecise));
        check!(validate_amount("0.0000000000000000000000000001") == Ok(Decimal::new(1, 28)));
        check!(
            validate_amount("1000000.000000000000000000000000000000")
                == Ok(MAX_AMOUNT)
        );
        check!(validate_amount("12.50").map(|amount| amount.scale()) == Ok(2));
    }

    proptest! {
        #[test]
        fn prop_positive_amounts_round_trip(units in 0u32..=1_000_000, cents in 0u32..100) {
            let value = Decimal::new(i64::from(units) * 100 + i64::from(cents), 2);
            prop_assume!(value > Decimal::ZERO && value <= MAX_AMOUNT);

            let text = format!("{units}.{cents:02}");
            prop_assert_eq!(validate_amount(&text), Ok(value));
        }

        #[test]
        fn prop_non_positive_amounts_rejected(units in 0u32..=1_000_000, cents in 0u32..100) {
            let text = format!("-{units}.{cents:02}");
            prop_assert_eq!(validate_amount(&text), Err(ValidationError::NotPositive));
        }

        #[test]
        fn prop_amounts_over_limit_rejected(units in 1_000_001u64..1_000_000_000_000, cents in 0u32..100) {
            let text = format!("{units}.{cents:02}");
            prop_assert_eq!(validate_amount(&text), Err(ValidationError::TooLarge));
        }

        #[test]
        fn prop_letters_are_invalid_amounts(text in "[a-zA-Z]{1,8}") {
            prop_assume!(!INFINITY_PATTERN.is_match(&text));
            prop_assert_eq!(validate_amount(&text), Err(ValidationError::InvalidFormat));
        }

        #[test]
        fn prop_six_to_twelve_digits_accepted(number in "[0-9]{6,12}") {
            prop_assert_eq!(validate_account_number(&number), Ok(number.clone()));
        }
    }
}
