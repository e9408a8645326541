// Copyright (C) 2015 The Libphonenumber Authors
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

/// Decoded numbering rules for one region or one non-geographical calling
/// code.
///
/// All pattern fields hold fully expanded regular expression sources. An
/// empty string means the entry carries no rule of that kind; matching a
/// non-empty number against an empty pattern never succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneMetadata {
    /// CLDR two-letter region code, or "001" for a non-geographical entity.
    pub id: String,
    pub country_code: i32,

    pub general_desc: String,
    /// Lengths-only variant of `general_desc`, used for possible-number
    /// checks.
    pub general_desc_possible: String,
    pub fixed_line: String,
    pub mobile: String,
    pub toll_free: String,
    pub premium_rate: String,
    pub shared_cost: String,
    pub personal_number: String,
    pub voip: String,
    pub pager: String,
    pub uan: String,
    pub voicemail: String,

    /// Pattern matching the international dialing prefixes usable in the
    /// region (e.g. "00", "011").
    pub international_prefix: String,
    /// Prefix pattern distinguishing this region from others sharing its
    /// calling code; empty for most regions.
    pub leading_digits: String,

    pub same_mobile_and_fixed_line_pattern: bool,
    pub main_country_for_code: bool,
    pub leading_zero_possible: bool,
    pub mobile_number_portable_region: bool,
}

impl PhoneMetadata {
    pub fn has_leading_digits(&self) -> bool {
        !self.leading_digits.is_empty()
    }
}
