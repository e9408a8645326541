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

use thiserror::Error;

/// The ways parsing a string into a phone number can fail. Parse errors are
/// returned to the caller, never recovered locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// The number carried an international prefix or plus sign, but no known
    /// country calling code followed it; or no usable default region was
    /// supplied and the number is not in international format.
    #[error("Invalid country code")]
    InvalidCountryCode,
    /// The string does not look like a phone number at all.
    #[error("The string supplied did not seem to be a phone number")]
    NotANumber,
    /// The number had an IDD, but after this was not long enough to be a
    /// viable phone number.
    #[error("Too short after IDD")]
    TooShortAfterIdd,
    /// The national significant number came out shorter than two digits.
    #[error("The string supplied is too short to be a phone number")]
    TooShortNsn,
    /// The input exceeded the parse length cap, or the national significant
    /// number came out longer than seventeen digits.
    #[error("The string supplied is too long to be a phone number")]
    TooLong,
}

/// Possible failures when testing whether a phone number is possible; the
/// successful outcome is the `Ok` side of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ValidationError {
    /// The number has an invalid country calling code.
    #[error("The number has an invalid country calling code")]
    InvalidCountryCode,
    /// The number is shorter than all valid numbers for this region.
    #[error("The number is shorter than all valid numbers for this region")]
    TooShort,
    /// The number is longer than the longest length that could still be a
    /// prefix of a valid number for this region.
    #[error("The number is longer than all valid numbers for this region")]
    TooLong,
}
