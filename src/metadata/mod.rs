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

//! Decoding of the compact single-file phone metadata format.
//!
//! The file packs the numbering rules of every region into one bit stream: a
//! 16-bit entry count, a 6-byte-per-entry index, and a body of 5-bit symbols
//! spelling regex patterns in a small mini-language that is expanded back to
//! real regular expressions on demand.

pub(crate) mod codec;
mod collection;
mod phone_metadata;
mod source;

use thiserror::Error;

pub(crate) use collection::PhoneMetadataCollection;
pub use phone_metadata::PhoneMetadata;
pub use source::SingleFileMetadataSource;

/// The number of entries a well-formed metadata file may carry.
pub(crate) const MAX_METADATA_ENTRIES: u16 = 1000;

/// Fatal structural problems in a metadata file. Any of these means the file
/// is corrupt or truncated; there is no per-entry recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("metadata stream too short: needed {expected} bytes, got {actual}")]
    UnexpectedEof { expected: usize, actual: usize },

    #[error("invalid number of metadata entries: {0}")]
    InvalidEntryCount(u16),

    #[error("metadata record starting at symbol {0} is not terminated")]
    UnterminatedRecord(u32),
}
