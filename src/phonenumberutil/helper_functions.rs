use std::collections::HashMap;

use crate::phonenumber::PhoneNumber;

/// Normalizes a string of characters representing a phone number by replacing
/// all characters found in the accompanying map with the values therein, and
/// stripping all other characters if remove_non_matches is true.
///
/// Parameters:
/// * `normalization_replacements` - a mapping of characters to what they
///   should be replaced by in the normalized version of the phone number
/// * `remove_non_matches` - indicates whether characters that are not able to
///   be replaced should be stripped from the number. If this is false, they
///   will be left unchanged in the number.
/// * `phone_number` - the number to be normalized, in place.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    phone_number: &mut String,
) {
    let mut normalized_number = String::with_capacity(phone_number.len());
    for phone_char in phone_number.chars() {
        if let Some(replacement) = normalization_replacements.get(&phone_char.to_ascii_uppercase())
        {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(phone_char);
        }
        // If neither of the above are true, we remove this character.
    }

    *phone_number = normalized_number;
}

/// Converts every Unicode decimal digit (wide-ascii, arabic-indic, ...) to
/// its European form and strips everything else.
pub(super) fn normalize_digits_only(number: &str) -> String {
    dec_from_char::normalize_decimals(number)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Sets the leading-zero fields of `phone_number` from the string form of a
/// national significant number. Note that if the national number is all
/// zeros, the last zero is not counted as a leading zero.
pub(super) fn set_italian_leading_zeros_for_phone_number(
    national_number: &str,
    phone_number: &mut PhoneNumber,
) {
    if national_number.len() > 1 && national_number.starts_with('0') {
        phone_number.set_italian_leading_zero(true);
        let bytes = national_number.as_bytes();
        let mut number_of_leading_zeros = 1;
        while number_of_leading_zeros < national_number.len() - 1
            && bytes[number_of_leading_zeros] == b'0'
        {
            number_of_leading_zeros += 1;
        }
        if number_of_leading_zeros != 1 {
            phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
        }
    }
}
