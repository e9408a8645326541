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

/// Records where a parsed country calling code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountryCodeSource {
    /// The number started with one or more plus signs.
    FromNumberWithPlusSign,
    /// The number started with the international dialing prefix of the
    /// region it was parsed with (e.g. "00" or "011").
    FromNumberWithIdd,
    /// The number started with the calling code of the default region
    /// without any international prefix.
    FromNumberWithoutPlusSign,
    /// The calling code was taken from the default region supplied by the
    /// caller.
    FromDefaultCountry,
}

/// The canonical representation of a parsed phone number.
///
/// Every field is optional with proto2-style accessors: a getter returning
/// the field default when unset, plus `has_*`, `set_*` and `clear_*`. The
/// national number is stored numerically, so leading zeros are carried
/// out-of-band in [`PhoneNumber::italian_leading_zero`] and
/// [`PhoneNumber::number_of_leading_zeros`].
///
/// Values are produced by the parser and are meant to be treated as
/// immutable afterwards; a single pre-allocated value can be reused across
/// parses via the `*_into` entry points of `PhoneNumberUtil`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: Option<i32>,
    national_number: Option<u64>,
    italian_leading_zero: Option<bool>,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: Option<CountryCodeSource>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets every field to its unset state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn country_code(&self) -> i32 {
        self.country_code.unwrap_or(0)
    }

    pub fn has_country_code(&self) -> bool {
        self.country_code.is_some()
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = Some(country_code);
    }

    pub fn national_number(&self) -> u64 {
        self.national_number.unwrap_or(0)
    }

    pub fn has_national_number(&self) -> bool {
        self.national_number.is_some()
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = Some(national_number);
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.unwrap_or(false)
    }

    pub fn has_italian_leading_zero(&self) -> bool {
        self.italian_leading_zero.is_some()
    }

    pub fn set_italian_leading_zero(&mut self, italian_leading_zero: bool) {
        self.italian_leading_zero = Some(italian_leading_zero);
    }

    /// Only meaningful when [`Self::italian_leading_zero`] is set; defaults
    /// to one leading zero.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_number_of_leading_zeros(&self) -> bool {
        self.number_of_leading_zeros.is_some()
    }

    pub fn set_number_of_leading_zeros(&mut self, number_of_leading_zeros: i32) {
        self.number_of_leading_zeros = Some(number_of_leading_zeros);
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn set_raw_input(&mut self, raw_input: String) {
        self.raw_input = Some(raw_input);
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source
            .unwrap_or(CountryCodeSource::FromNumberWithPlusSign)
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn set_country_code_source(&mut self, country_code_source: CountryCodeSource) {
        self.country_code_source = Some(country_code_source);
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = None;
    }
}
