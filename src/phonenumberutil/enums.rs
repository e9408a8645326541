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

/// Categorizes phone numbers based on their primary use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    /// Traditional landline numbers tied to a specific geographic location.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Used in regions (e.g. the USA) where it is impossible to distinguish
    /// between fixed-line and mobile numbers by looking at the phone number
    /// itself.
    FixedLineOrMobile,
    /// Freephone lines: the cost is paid by the recipient.
    TollFree,
    /// Numbers charging a higher rate than normal calls.
    PremiumRate,
    /// The cost of the call is shared between the caller and the recipient,
    /// and is hence typically less than premium-rate calls.
    SharedCost,
    /// Voice over IP numbers. This includes TSoIP (Telephony Service over
    /// IP).
    VoIP,
    /// A personal number is associated with a particular person, and may be
    /// routed to either a mobile or fixed-line number.
    PersonalNumber,
    Pager,
    /// Used for "Universal Access Numbers" or "Company Numbers". They may be
    /// further routed to specific offices, but allow one number to be used
    /// for a company.
    UAN,
    /// Used for "Voice Mail Access Numbers".
    VoiceMail,
    /// The number does not fit any of the known patterns for a specific
    /// region.
    Unknown,
}
