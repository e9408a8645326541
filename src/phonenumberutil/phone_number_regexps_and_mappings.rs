// Copyright (C) 2009 The Libphonenumber Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashMap;

use regex::Regex;

use crate::phonenumberutil::helper_constants::{
    DIGITS, MIN_LENGTH_FOR_NSN, PLUS_CHARS, STAR_SIGN, VALID_ALPHA, VALID_PUNCTUATION,
};
use crate::regexp_cache::RegexCache;

pub(super) struct PhoneNumberRegExpsAndMappings {
    pub regexp_cache: RegexCache,

    /// A map that contains characters that are essential when dialling. That
    /// means any of the characters in this map must not be removed from a
    /// number when dialing, otherwise the call will not reach the intended
    /// destination.
    pub diallable_char_mappings: HashMap<char, char>,
    /// These mappings map a character (key) to a specific digit that should
    /// replace it for normalization purposes, per the ITU E.161 keypad.
    pub alpha_mappings: HashMap<char, char>,
    /// For performance reasons, store a map of combining alpha_mappings with
    /// ASCII digits.
    pub alpha_phone_mappings: HashMap<char, char>,

    pub plus_chars_pattern: Regex,
    pub capturing_digit_pattern: Regex,

    /// Regular expression of viable phone numbers. This is location
    /// independent. Checks we have at least three leading digits, and only
    /// valid punctuation, alpha characters and digits in the phone number.
    /// The symbol 'x' is allowed here as valid punctuation since it is often
    /// used as a placeholder for carrier codes, for example in Brazilian
    /// phone numbers. We also allow multiple plus-signs at the start.
    ///
    /// Corresponds to the following:
    /// `plus_sign*(([punctuation]|[star])*[digits]){3,}
    /// ([punctuation]|[star]|[digits]|[alpha])*|
    /// [digits]{minLengthNsn}`
    ///
    /// The trailing alternative allows short numbers (two digits long) to be
    /// parsed if they are entered as "15" etc, but only if there is no
    /// punctuation in them.
    pub valid_phone_number_pattern: Regex,

    /// We use this pattern to check if the phone number has at least three
    /// letters in it - if so, then we treat it as a number where some
    /// phone-number digits are represented by letters.
    pub valid_alpha_phone_pattern: Regex,
}

impl PhoneNumberRegExpsAndMappings {
    fn initialize_mappings(&mut self) {
        // Simple ASCII digits map used to populate the other mappings.
        let mut ascii_digit_mappings = HashMap::with_capacity(10);
        for d in '0'..='9' {
            ascii_digit_mappings.insert(d, d);
        }

        // Only upper-case letters are stored; lookups upper-case first.
        let mut alpha_map = HashMap::with_capacity(40);
        alpha_map.insert('A', '2');
        alpha_map.insert('B', '2');
        alpha_map.insert('C', '2');
        alpha_map.insert('D', '3');
        alpha_map.insert('E', '3');
        alpha_map.insert('F', '3');
        alpha_map.insert('G', '4');
        alpha_map.insert('H', '4');
        alpha_map.insert('I', '4');
        alpha_map.insert('J', '5');
        alpha_map.insert('K', '5');
        alpha_map.insert('L', '5');
        alpha_map.insert('M', '6');
        alpha_map.insert('N', '6');
        alpha_map.insert('O', '6');
        alpha_map.insert('P', '7');
        alpha_map.insert('Q', '7');
        alpha_map.insert('R', '7');
        alpha_map.insert('S', '7');
        alpha_map.insert('T', '8');
        alpha_map.insert('U', '8');
        alpha_map.insert('V', '8');
        alpha_map.insert('W', '9');
        alpha_map.insert('X', '9');
        alpha_map.insert('Y', '9');
        alpha_map.insert('Z', '9');
        self.alpha_mappings = alpha_map;

        let mut combined_map = HashMap::with_capacity(100);
        combined_map.extend(self.alpha_mappings.iter());
        combined_map.extend(ascii_digit_mappings.iter());
        self.alpha_phone_mappings = combined_map;

        let mut diallable_char_map = HashMap::new();
        diallable_char_map.extend(ascii_digit_mappings.iter());
        diallable_char_map.insert('+', '+');
        diallable_char_map.insert('*', '*');
        self.diallable_char_mappings = diallable_char_map;
    }

    pub fn new() -> Self {
        let valid_phone_number = format!(
            // The 2-digit alternative goes last so the general form is tried
            // first.
            "[{}]*(?:[{}{}]*{}){{3,}}[{}{}{}{}]*|{}{{{}}}",
            PLUS_CHARS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_PUNCTUATION,
            STAR_SIGN,
            DIGITS,
            VALID_ALPHA,
            DIGITS,
            MIN_LENGTH_FOR_NSN,
        );

        let mut instance = Self {
            regexp_cache: RegexCache::with_capacity(100),
            diallable_char_mappings: Default::default(),
            alpha_mappings: Default::default(),
            alpha_phone_mappings: Default::default(),
            plus_chars_pattern: Regex::new(&format!("[{}]+", PLUS_CHARS)).unwrap(),
            capturing_digit_pattern: Regex::new(&format!("({})", DIGITS)).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!("(?i)^(?:{})$", valid_phone_number))
                .unwrap(),
            // from java
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
        };
        instance.initialize_mappings();
        instance
    }
}
