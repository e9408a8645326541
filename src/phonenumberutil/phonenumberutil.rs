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

use std::cmp::{max, min};
use std::collections::HashSet;
use std::sync::Arc;

use log::{info, trace, warn};

use crate::{
    i18n,
    interfaces::{MatcherApi, MetadataSource},
    metadata::PhoneMetadata,
    phonenumber::{CountryCodeSource, PhoneNumber},
    phonenumberutil::{
        errors::{ParseError, ValidationError},
        helper_constants::{
            MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
            MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, REGION_CODE_FOR_NON_GEO_ENTITY,
            UNKNOWN_IDD_PREFIX,
        },
        helper_functions::{
            normalize_digits_only, normalize_helper, set_italian_leading_zeros_for_phone_number,
        },
        phone_number_regexps_and_mappings::PhoneNumberRegExpsAndMappings,
        PhoneNumberType,
    },
    regex_based_matcher::RegexBasedMatcher,
    regex_util::{CachedRegex, RegexConsume, RegexFullMatch, RegexMatchStart},
};

/// Utility for international phone numbers: parsing, validation and
/// classification against a compact metadata file.
///
/// Region codes given to the methods of this type must be ISO 3166-1
/// two-letter codes in upper case; "ZZ" denotes the unknown region and "001"
/// non-geographical entities.
pub struct PhoneNumberUtil {
    /// An API for validation checking.
    matcher_api: Box<dyn MatcherApi>,

    /// Helper holding useful regular expressions and character mappings.
    reg_exps: PhoneNumberRegExpsAndMappings,

    /// A source of metadata for different regions.
    metadata_source: Box<dyn MetadataSource>,

    /// A mapping from a country calling code to the region codes which
    /// denote the region represented by that country calling code. In the
    /// case of multiple regions sharing a calling code, such as the NANPA
    /// regions, the one indicated with "main_country_for_code" in the
    /// metadata should be first. Implemented as a sorted vector to achieve
    /// better performance.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The set of regions that share country calling code 1.
    nanpa_regions: HashSet<String>,

    /// The set of regions the instance has metadata for. Does not include
    /// the non-geo entity region code.
    supported_regions: HashSet<String>,

    /// The set of country calling codes that map to the non-geo entity
    /// region ("001").
    country_codes_for_non_geographical_region: HashSet<i32>,
}

impl PhoneNumberUtil {
    /// Creates an instance from a metadata source and the table mapping each
    /// country calling code to the ordered list of region codes sharing it.
    ///
    /// The table drives calling-code recognition and region iteration order;
    /// a calling code whose single region is "001" is registered as a
    /// non-geographical entity.
    pub fn new<S: MetadataSource + 'static>(
        metadata_source: S,
        country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,
    ) -> Self {
        let mut supported_regions = HashSet::with_capacity(320);
        let mut country_codes_for_non_geographical_region = HashSet::new();
        let mut nanpa_regions = HashSet::with_capacity(35);
        for (country_calling_code, region_codes) in &country_calling_code_to_region_code_map {
            // We can assume that if the country calling code maps to the
            // non-geo entity region code then that's the only region code it
            // maps to.
            if region_codes.len() == 1 && region_codes[0] == REGION_CODE_FOR_NON_GEO_ENTITY {
                country_codes_for_non_geographical_region.insert(*country_calling_code);
            } else {
                supported_regions.extend(region_codes.iter().cloned());
            }
            if *country_calling_code == NANPA_COUNTRY_CODE {
                nanpa_regions.extend(region_codes.iter().cloned());
            }
        }
        // If the non-geo entity still got added to the set of supported
        // regions it must be because there are entries that list the non-geo
        // entity alongside normal regions (which is wrong). If we discover
        // this, remove the non-geo entity from the set of supported regions
        // and log.
        if supported_regions.remove(REGION_CODE_FOR_NON_GEO_ENTITY) {
            warn!(
                "invalid metadata (country calling code was mapped to the \
                 non-geo entity as well as specific region(s))"
            );
        }

        let mut country_calling_code_to_region_code_map = country_calling_code_to_region_code_map;
        // Sort all the pairs in ascending order according to country calling
        // code.
        country_calling_code_to_region_code_map.sort_by_key(|(code, _)| *code);

        Self {
            matcher_api: Box::new(RegexBasedMatcher::new()),
            reg_exps: PhoneNumberRegExpsAndMappings::new(),
            metadata_source: Box::new(metadata_source),
            country_calling_code_to_region_code_map,
            nanpa_regions,
            supported_regions,
            country_codes_for_non_geographical_region,
        }
    }

    /// Returns the region codes the instance has metadata for.
    pub fn get_supported_regions(&self) -> impl Iterator<Item = &str> {
        self.supported_regions.iter().map(String::as_str)
    }

    /// Returns the global network calling codes (non-geographical entities)
    /// the instance has metadata for.
    pub fn get_supported_global_network_calling_codes(
        &self,
    ) -> impl Iterator<Item = i32> + '_ {
        self.country_codes_for_non_geographical_region.iter().copied()
    }

    /// Returns every country calling code the instance recognizes, both
    /// geographical and non-geographical.
    pub fn get_supported_calling_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.country_calling_code_to_region_code_map
            .iter()
            .map(|(code, _)| *code)
    }

    /// Returns true if the region shares country calling code 1 under the
    /// North American Numbering Plan.
    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    /// Checks to see if the string of characters could possibly be a phone
    /// number at all. Checks that the string begins with at least 2 digits,
    /// ignoring any punctuation commonly found in phone numbers.
    pub fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.full_match(number)
    }

    /// Normalizes a string of characters representing a phone number.
    ///
    /// Punctuation is stripped. For alpha/vanity numbers (3 or more ASCII
    /// letters anywhere in the input), letters are converted to their
    /// numeric representation on the ITU E.161 telephone keypad; for other
    /// numbers every Unicode decimal digit is converted to its European form
    /// and spurious alpha characters are stripped.
    pub fn normalize(&self, number: &str) -> String {
        let mut normalized = number.to_owned();
        self.normalize_in_place(&mut normalized);
        normalized
    }

    fn normalize_in_place(&self, number: &mut String) {
        if self.reg_exps.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, number);
        } else {
            *number = normalize_digits_only(number);
        }
    }

    /// Converts wide-ascii and arabic-indic numerals to European numerals
    /// and strips punctuation and alpha characters.
    pub fn normalize_digits_only(&self, number: &str) -> String {
        normalize_digits_only(number)
    }

    /// Strips all characters which are not diallable on a mobile phone
    /// keypad: everything but digits, '+' and '*'. Unicode decimal digits
    /// fold to their European form first.
    pub fn normalize_diallable_chars_only(&self, number: &str) -> String {
        let mut normalized = dec_from_char::normalize_decimals(number).to_string();
        normalize_helper(&self.reg_exps.diallable_char_mappings, true, &mut normalized);
        normalized
    }

    /// Gets the national significant number of a phone number: its leading
    /// zeros, if any, followed by the decimal form of the national number.
    /// Note a national significant number doesn't contain a national prefix
    /// or any formatting.
    pub fn get_national_significant_number(phone_number: &PhoneNumber) -> String {
        // If leading zero(s) have been set, we prefix this now. Note this is
        // not a national prefix. Ensure the number of leading zeros is at
        // least 0 so malicious input cannot underflow the repeat count.
        let zeros_start = if phone_number.italian_leading_zero() {
            "0".repeat(max(phone_number.number_of_leading_zeros(), 0) as usize)
        } else {
            String::new()
        };

        let mut buf = itoa::Buffer::new();
        let national_number = buf.format(phone_number.national_number());

        fast_cat::concat_str!(&zeros_start, national_number)
    }

    fn is_valid_region_code(&self, region_code: &str) -> bool {
        self.supported_regions.contains(region_code)
    }

    fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .is_ok()
    }

    /// Returns the region code that matches the specific country calling
    /// code. In the case of no region code being found, "ZZ" will be
    /// returned. In the case of multiple regions, the one designated in the
    /// metadata as the "main" region for this calling code will be returned.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.get_region_codes_for_country_calling_code(country_calling_code)
            .first()
            .copied()
            .unwrap_or(i18n::RegionCode::get_unknown())
    }

    /// Returns the region codes that match the specific country calling
    /// code, in table order. For non-geographical country calling codes the
    /// list holds the region code "001"; for unknown codes it is empty.
    pub fn get_region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Vec<&str> {
        let mut region_codes = Vec::with_capacity(10);
        if let Ok(index) = self
            .country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
        {
            region_codes.extend(
                self.country_calling_code_to_region_code_map[index]
                    .1
                    .iter()
                    .map(String::as_str),
            );
        }
        region_codes
    }

    /// Returns the country calling code for a specific region. For example,
    /// this would be 1 for the United States, and 64 for New Zealand.
    /// Returns 0 for unknown regions, which is logged.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        if !self.is_valid_region_code(region_code) {
            warn!("Invalid or missing region code ({}) provided.", region_code);
            return 0;
        }
        self.get_country_code_for_valid_region(region_code)
            .unwrap_or(0)
    }

    fn get_country_code_for_valid_region(&self, region_code: &str) -> Option<i32> {
        self.get_metadata_for_region(region_code)
            .map(|metadata| metadata.country_code)
    }

    /// Returns the metadata for the given region code, or `None` if the
    /// region code is invalid or unknown.
    fn get_metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        if !self.is_valid_region_code(region_code) {
            return None;
        }
        self.metadata_source.metadata_for_region(region_code)
    }

    fn get_metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<Arc<PhoneMetadata>> {
        if !self
            .country_codes_for_non_geographical_region
            .contains(&country_calling_code)
        {
            return None;
        }
        self.metadata_source
            .metadata_for_non_geographical_region(country_calling_code)
    }

    fn get_metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: Option<&str>,
    ) -> Option<Arc<PhoneMetadata>> {
        match region_code {
            Some(REGION_CODE_FOR_NON_GEO_ENTITY) => {
                self.get_metadata_for_non_geographical_region(country_calling_code)
            }
            Some(region_code) => self.get_metadata_for_region(region_code),
            None => None,
        }
    }

    /// Compiles a pattern coming out of the metadata. These are validated at
    /// build time, so a failure is a library bug rather than user error.
    fn metadata_regex(&self, pattern: &str) -> Arc<CachedRegex> {
        self.reg_exps.regexp_cache.get_regex(pattern).unwrap_or_else(|err| {
            panic!(
                "A valid regex is expected in metadata; this indicates a library bug! {}",
                err
            )
        })
    }

    fn is_number_matching_desc(&self, national_number: &str, number_desc: &str) -> bool {
        self.matcher_api
            .match_national_number(national_number, number_desc, false)
    }

    /// Gets the type of a phone number.
    pub fn get_number_type(&self, phone_number: &PhoneNumber) -> PhoneNumberType {
        let region_code = self.get_region_code_for_number(phone_number);
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(phone_number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, &metadata)
    }

    fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &PhoneMetadata,
    ) -> PhoneNumberType {
        if !self.is_number_matching_desc(national_number, &metadata.general_desc) {
            trace!(
                "Number '{national_number}' type unknown - doesn't match general \
                 national number pattern"
            );
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, &metadata.premium_rate) {
            trace!("Number '{national_number}' is a premium number.");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, &metadata.toll_free) {
            trace!("Number '{national_number}' is a toll-free number.");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, &metadata.shared_cost) {
            trace!("Number '{national_number}' is a shared cost number.");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, &metadata.voip) {
            trace!("Number '{national_number}' is a VOIP (Voice over IP) number.");
            return PhoneNumberType::VoIP;
        }
        if self.is_number_matching_desc(national_number, &metadata.personal_number) {
            trace!("Number '{national_number}' is a personal number.");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, &metadata.pager) {
            trace!("Number '{national_number}' is a pager number.");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, &metadata.uan) {
            trace!("Number '{national_number}' is a UAN.");
            return PhoneNumberType::UAN;
        }
        if self.is_number_matching_desc(national_number, &metadata.voicemail) {
            trace!("Number '{national_number}' is a voicemail number.");
            return PhoneNumberType::VoiceMail;
        }

        let is_fixed_line = self.is_number_matching_desc(national_number, &metadata.fixed_line);
        if is_fixed_line {
            if metadata.same_mobile_and_fixed_line_pattern {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns equal, \
                     number is fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            } else if self.is_number_matching_desc(national_number, &metadata.mobile) {
                trace!(
                    "Number '{national_number}': fixed-line and mobile patterns differ, \
                     but number is still fixed-line or mobile"
                );
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("Number '{national_number}' is a fixed line number.");
            return PhoneNumberType::FixedLine;
        }
        // Otherwise, test to see if the number is mobile. Only do this if
        // certain that the patterns for mobile and fixed line aren't the
        // same.
        if !metadata.same_mobile_and_fixed_line_pattern
            && self.is_number_matching_desc(national_number, &metadata.mobile)
        {
            trace!("Number '{national_number}' is a mobile number.");
            return PhoneNumberType::Mobile;
        }
        trace!(
            "Number '{national_number}' type unknown - doesn't match any specific \
             number type pattern."
        );
        PhoneNumberType::Unknown
    }

    /// Returns the region where a phone number is from. This could be used
    /// for geocoding at the region level. Returns `None` if no region
    /// matches the number's calling code, or, for calling codes shared by
    /// several regions, if no region's rules claim the number.
    pub fn get_region_code_for_number(&self, phone_number: &PhoneNumber) -> Option<&str> {
        let country_calling_code = phone_number.country_code();
        let region_codes = self.get_region_codes_for_country_calling_code(country_calling_code);
        if region_codes.is_empty() {
            info!(
                "Missing/invalid country calling code ({}) for number {}",
                country_calling_code,
                Self::get_national_significant_number(phone_number)
            );
            return None;
        }
        if region_codes.len() == 1 {
            return Some(region_codes[0]);
        }
        self.get_region_code_for_number_from_region_list(phone_number, &region_codes)
    }

    fn get_region_code_for_number_from_region_list<'b>(
        &self,
        phone_number: &PhoneNumber,
        region_codes: &[&'b str],
    ) -> Option<&'b str> {
        let national_number = Self::get_national_significant_number(phone_number);
        for region_code in region_codes {
            // If leading_digits is present, use this. Otherwise, do full
            // validation. Metadata cannot be absent because the region codes
            // come from the country calling code map.
            let Some(metadata) = self.get_metadata_for_region(region_code) else {
                continue;
            };
            if metadata.has_leading_digits() {
                if self
                    .metadata_regex(&metadata.leading_digits)
                    .match_start(&national_number)
                {
                    return Some(region_code);
                }
            } else if self.get_number_type_helper(&national_number, &metadata)
                != PhoneNumberType::Unknown
            {
                return Some(region_code);
            }
        }
        None
    }

    /// Tests whether a phone number matches a valid pattern. Note this
    /// doesn't verify the number is actually in use, which is impossible to
    /// tell by just looking at a number itself.
    pub fn is_valid_number(&self, phone_number: &PhoneNumber) -> bool {
        let Some(region_code) = self.get_region_code_for_number(phone_number) else {
            return false;
        };
        self.is_valid_number_for_region(phone_number, region_code)
    }

    /// Tests whether a phone number is valid for a certain region. If the
    /// country calling code is not the same as the country calling code for
    /// the region, this immediately exits with false.
    ///
    /// Warning: in most cases [`Self::is_valid_number`] is the method you
    /// want. This one will mark numbers from British Crown dependencies such
    /// as the Isle of Man as invalid for the region "GB", since they have
    /// their own region codes.
    pub fn is_valid_number_for_region(&self, phone_number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = phone_number.country_code();
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_code, Some(region_code))
        else {
            return false;
        };
        if REGION_CODE_FOR_NON_GEO_ENTITY != region_code
            && self.get_country_code_for_valid_region(region_code) != Some(country_code)
        {
            // Either the region code was invalid, or the country calling
            // code for this number does not match that of the region code.
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(phone_number);
        self.get_number_type_helper(&national_significant_number, &metadata)
            != PhoneNumberType::Unknown
    }

    /// Tests whether a phone number has a geographical association: it is a
    /// fixed-line number, or cannot be distinguished from one.
    // TODO: Include mobile phone numbers from countries like Indonesia,
    // which has some mobile numbers that are geographical.
    pub fn is_number_geographical(&self, phone_number: &PhoneNumber) -> bool {
        let number_type = self.get_number_type(phone_number);
        number_type == PhoneNumberType::FixedLine
            || number_type == PhoneNumberType::FixedLineOrMobile
    }

    /// Checks whether the country calling code belongs to a region whose
    /// national significant number could contain a leading zero. An example
    /// of such a region is Italy. Returns false if no metadata for the
    /// calling code is found.
    pub fn is_leading_zero_possible(&self, country_calling_code: i32) -> bool {
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(main_metadata) =
            self.get_metadata_for_region_or_calling_code(country_calling_code, Some(region_code))
        else {
            return false;
        };
        main_metadata.leading_zero_possible
    }

    /// Helper to check a number against a particular pattern and determine
    /// whether it matches, or is too short or too long. Note that if a
    /// pattern allows lengths 7 and 10, a number of length 8 reports
    /// `TooLong`.
    fn test_number_length_against_pattern(
        &self,
        number_pattern: &str,
        number: &str,
    ) -> Result<(), ValidationError> {
        let pattern = self.metadata_regex(number_pattern);
        if pattern.full_match(number) {
            return Ok(());
        }
        if pattern.match_start(number) {
            Err(ValidationError::TooLong)
        } else {
            Err(ValidationError::TooShort)
        }
    }

    /// Convenience wrapper around
    /// [`Self::is_possible_number_with_reason`].
    pub fn is_possible_number(&self, phone_number: &PhoneNumber) -> bool {
        self.is_possible_number_with_reason(phone_number).is_ok()
    }

    /// Checks whether a phone number is a possible number. This provides a
    /// more lenient check than [`Self::is_valid_number`]: it only checks the
    /// length of the national significant number against the general rules
    /// for the region, not its starting digits or type.
    pub fn is_possible_number_with_reason(
        &self,
        phone_number: &PhoneNumber,
    ) -> Result<(), ValidationError> {
        let national_number = Self::get_national_significant_number(phone_number);
        let country_code = phone_number.country_code();
        // Note: for NANPA and Russian-plan numbers we just use the rules
        // from the main region of the calling code, since
        // get_region_code_for_number does not work for numbers that are
        // possible but not valid.
        if !self.has_valid_country_calling_code(country_code) {
            return Err(ValidationError::InvalidCountryCode);
        }
        let region_code = self.get_region_code_for_country_code(country_code);
        // Metadata cannot be absent because the country calling code is
        // valid.
        let Some(metadata) =
            self.get_metadata_for_region_or_calling_code(country_code, Some(region_code))
        else {
            return Err(ValidationError::InvalidCountryCode);
        };
        self.test_number_length_against_pattern(&metadata.general_desc_possible, &national_number)
    }

    /// Checks whether a phone number given as a string is a possible number
    /// when dialed from the given region. The number is parsed first; a
    /// parse failure means false.
    pub fn is_possible_number_for_string(
        &self,
        number: &str,
        region_dialing_from: &str,
    ) -> bool {
        match self.parse(number, region_dialing_from) {
            Ok(phone_number) => self.is_possible_number(&phone_number),
            Err(_) => false,
        }
    }

    /// Extracts the country calling code from the beginning of
    /// `full_number`, placing the remainder into `national_number`. Assumes
    /// any leading plus sign or IDD has already been removed. Returns 0 if
    /// `full_number` doesn't start with a valid country calling code, and
    /// leaves `national_number` unmodified in that case.
    fn extract_country_code(&self, full_number: &str, national_number: &mut String) -> i32 {
        if full_number.is_empty() || full_number.starts_with('0') {
            // Country codes do not begin with a '0'.
            return 0;
        }
        for i in 1..=min(MAX_LENGTH_COUNTRY_CODE, full_number.len()) {
            let Ok(potential_country_code) = full_number[..i].parse::<i32>() else {
                return 0;
            };
            if self.has_valid_country_calling_code(potential_country_code) {
                national_number.push_str(&full_number[i..]);
                return potential_country_code;
            }
        }
        0
    }

    /// Tries to extract a country calling code from a number. Country
    /// calling codes are extracted in the following ways:
    ///
    /// * by stripping the international dialing prefix of the region the
    ///   person is dialing from, if this is present in the number, and
    ///   looking at the next digits;
    /// * by stripping the plus sign if present and then looking at the next
    ///   digits;
    /// * by comparing the start of the number and the country calling code
    ///   of the default region. If the number is not considered possible for
    ///   the numbering plan of the default region initially, but starts with
    ///   the country calling code of this region, validation is reattempted
    ///   after stripping it.
    ///
    /// Returns `InvalidCountryCode` if the number starts with a plus sign or
    /// IDD but the digits after it match no known calling code, and 0 when
    /// no country calling code is considered present at all.
    pub(crate) fn maybe_extract_country_code(
        &self,
        number: &str,
        default_region_metadata: Option<&PhoneMetadata>,
        national_number: &mut String,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<i32, ParseError> {
        if number.is_empty() {
            return Ok(0);
        }
        let mut full_number = number.to_owned();
        // Set the default prefix to be something that will never match.
        let possible_country_idd_prefix = default_region_metadata
            .map(|metadata| metadata.international_prefix.as_str())
            .unwrap_or(UNKNOWN_IDD_PREFIX);

        let country_code_source = self
            .maybe_strip_international_prefix_and_normalize(
                &mut full_number,
                possible_country_idd_prefix,
            );
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd);
            }
            let potential_country_code = self.extract_country_code(&full_number, national_number);
            if potential_country_code != 0 {
                phone_number.set_country_code(potential_country_code);
                return Ok(potential_country_code);
            }
            // If this fails, they must be using a strange country calling
            // code that we don't recognize, or that doesn't exist.
            return Err(ParseError::InvalidCountryCode);
        } else if let Some(metadata) = default_region_metadata {
            // Check to see if the number starts with the country calling
            // code for the default region. If so, we remove the country
            // calling code, and do some checks on the validity of the number
            // before and after.
            let default_country_code = metadata.country_code;
            let mut buf = itoa::Buffer::new();
            let default_country_code_str = buf.format(default_country_code);
            if let Some(potential_national_number) =
                full_number.strip_prefix(default_country_code_str)
            {
                let valid_number_pattern = self.metadata_regex(&metadata.general_desc);
                // If the number was not valid before but is valid now, or if
                // it was too long before, we consider the number with the
                // country calling code stripped to be a better result and
                // keep that instead.
                if (!valid_number_pattern.full_match(&full_number)
                    && valid_number_pattern.full_match(potential_national_number))
                    || matches!(
                        self.test_number_length_against_pattern(
                            &metadata.general_desc_possible,
                            &full_number,
                        ),
                        Err(ValidationError::TooLong)
                    )
                {
                    national_number.push_str(potential_national_number);
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok(default_country_code);
                }
            }
        }
        // No country calling code present.
        phone_number.set_country_code(0);
        Ok(0)
    }

    /// Strips the IDD from the start of the number if present. Helper used
    /// by `maybe_strip_international_prefix_and_normalize`.
    fn parse_prefix_as_idd(&self, idd_pattern: &CachedRegex, number: &mut String) -> bool {
        let Some(match_end) = idd_pattern
            .consume_start(number.as_str())
            .map(|rest| number.len() - rest.len())
        else {
            return false;
        };
        // Only strip this if the first digit after the match is not a 0,
        // since country calling codes cannot begin with 0.
        if let Some(captures) = self
            .reg_exps
            .capturing_digit_pattern
            .captures(&number[match_end..])
        {
            if let Some(digit) = captures.get(1) {
                if normalize_digits_only(digit.as_str()) == "0" {
                    return false;
                }
            }
        }
        number.drain(..match_end);
        true
    }

    /// Strips any international prefix (such as +, 00, 011) present in the
    /// number, normalizes the rest, and reports how the prefix was written.
    /// `FromDefaultCountry` means the number did not seem to be in
    /// international format at all.
    pub(crate) fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &mut String,
        possible_idd_prefix: &str,
    ) -> CountryCodeSource {
        if number.is_empty() {
            return CountryCodeSource::FromDefaultCountry;
        }
        // Check to see if the number begins with one or more plus signs.
        if let Some(rest) = self
            .reg_exps
            .plus_chars_pattern
            .consume_start(number.as_str())
            .map(str::to_owned)
        {
            *number = rest;
            // Can now normalize the rest of the number since we've consumed
            // the "+" sign at the start.
            self.normalize_in_place(number);
            return CountryCodeSource::FromNumberWithPlusSign;
        }
        // Attempt to parse the first digits as an international prefix.
        let idd_pattern = self.metadata_regex(possible_idd_prefix);
        self.normalize_in_place(number);
        if self.parse_prefix_as_idd(&idd_pattern, number) {
            CountryCodeSource::FromNumberWithIdd
        } else {
            CountryCodeSource::FromDefaultCountry
        }
    }

    /// Checks that the region code used is valid, or if it is not, that the
    /// number to parse starts with a plus sign so that the region can be
    /// inferred from the number itself.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        if !self.is_valid_region_code(default_region) {
            if number_to_parse.is_empty()
                || !self.reg_exps.plus_chars_pattern.match_start(number_to_parse)
            {
                return false;
            }
        }
        true
    }

    /// Parses a string into a [`PhoneNumber`].
    ///
    /// The method is fairly lenient: the number may be in national or
    /// international format, with punctuation or keypad letters. Note that
    /// validation of whether the number is actually valid for its region is
    /// not performed; use [`Self::is_valid_number`] for that.
    ///
    /// `default_region` is the region we expect the number to be from, used
    /// only when the number is not written in international format; it may
    /// be "ZZ" when the number is guaranteed to start with a plus sign.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        let mut phone_number = PhoneNumber::new();
        self.parse_into(number_to_parse, default_region, &mut phone_number)?;
        Ok(phone_number)
    }

    /// Same as [`Self::parse`], but fills a caller-provided value to
    /// decrease object creation when invoked many times.
    pub fn parse_into(
        &self,
        number_to_parse: &str,
        default_region: &str,
        phone_number: &mut PhoneNumber,
    ) -> Result<(), ParseError> {
        self.parse_helper(number_to_parse, default_region, false, true, phone_number)
    }

    /// Same as [`Self::parse`], but additionally records the raw input and
    /// where the country calling code came from.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        let mut phone_number = PhoneNumber::new();
        self.parse_and_keep_raw_input_into(number_to_parse, default_region, &mut phone_number)?;
        Ok(phone_number)
    }

    /// Same as [`Self::parse_and_keep_raw_input`], but fills a
    /// caller-provided value.
    pub fn parse_and_keep_raw_input_into(
        &self,
        number_to_parse: &str,
        default_region: &str,
        phone_number: &mut PhoneNumber,
    ) -> Result<(), ParseError> {
        self.parse_helper(number_to_parse, default_region, true, true, phone_number)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<(), ParseError> {
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLong);
        }
        phone_number.clear();

        let national_number = number_to_parse.to_owned();
        if !self.is_viable_phone_number(&national_number) {
            return Err(ParseError::NotANumber);
        }

        // Check the region supplied is valid, or that the extracted number
        // starts with some sort of plus sign so the number's region can be
        // determined.
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            return Err(ParseError::InvalidCountryCode);
        }

        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_owned());
        }

        let region_metadata = self.get_metadata_for_region(default_region);
        // Check to see if the number is given in international format so we
        // know whether this number is from the default region or not.
        let mut normalized_national_number = String::new();
        let country_code = match self.maybe_extract_country_code(
            &national_number,
            region_metadata.as_deref(),
            &mut normalized_national_number,
            keep_raw_input,
            phone_number,
        ) {
            Ok(country_code) => country_code,
            Err(ParseError::InvalidCountryCode)
                if self.reg_exps.plus_chars_pattern.match_start(&national_number) =>
            {
                // Strip the plus-char run, and try again.
                let rest = self
                    .reg_exps
                    .plus_chars_pattern
                    .consume_start(&national_number)
                    .unwrap_or("");
                let country_code = self.maybe_extract_country_code(
                    rest,
                    region_metadata.as_deref(),
                    &mut normalized_national_number,
                    keep_raw_input,
                    phone_number,
                )?;
                if country_code == 0 {
                    return Err(ParseError::InvalidCountryCode);
                }
                country_code
            }
            Err(err) => return Err(err),
        };

        if country_code == 0 {
            // If no extracted country calling code, use the region supplied
            // instead. The national number is just the normalized version of
            // the number we were given to parse.
            let mut national_number = national_number;
            self.normalize_in_place(&mut national_number);
            normalized_national_number.push_str(&national_number);
            if let Some(metadata) = &region_metadata {
                phone_number.set_country_code(metadata.country_code);
            } else if keep_raw_input {
                phone_number.clear_country_code_source();
            }
        }

        // National trunk prefixes are deliberately not stripped: the
        // compact metadata carries no prefix rules, so a number entered in
        // national format keeps its leading zero and is matched against
        // patterns that account for it.

        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLong);
        }
        set_italian_leading_zeros_for_phone_number(&normalized_national_number, phone_number);
        let national_number_value = normalized_national_number
            .parse::<u64>()
            .map_err(|_| ParseError::NotANumber)?;
        phone_number.set_national_number(national_number_value);
        Ok(())
    }
}
