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

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use log::{error, warn};

use crate::phonenumberutil::helper_constants::REGION_CODE_FOR_NON_GEO_ENTITY;

use super::{codec, MetadataError, PhoneMetadata, MAX_METADATA_ENTRIES};

const FLAG_SAME_MOBILE_FIXED: u16 = 1 << 10;
const FLAG_MAIN_COUNTRY_FOR_CODE: u16 = 1 << 11;
const FLAG_LEADING_ZERO_POSSIBLE: u16 = 1 << 12;
const FLAG_MOBILE_PORTABLE_REGION: u16 = 1 << 13;
const COUNTRY_CODE_MASK: u16 = 0x03FF;

/// Index words above this value spell a two-letter region code; at or below
/// it they are the calling code of a non-geographical entity.
const MAX_NON_GEO_ID: u16 = 1000;

/// The decoded skeleton of a metadata file: the index arrays, the raw 5-bit
/// symbol buffer, and the two lookup maps. Individual entries are expanded
/// into [`PhoneMetadata`] lazily, memoized by entry index.
pub(crate) struct PhoneMetadataCollection {
    /// Symbol offset of each entry inside `byte_buf`.
    data_position: Vec<u32>,
    /// Calling code and flag bits of each entry.
    calling_code: Vec<u16>,
    byte_buf: Vec<u8>,

    region_to_index: HashMap<String, usize>,
    non_geo_to_index: HashMap<i32, usize>,

    decoded: DashMap<usize, Arc<PhoneMetadata>>,
}

impl PhoneMetadataCollection {
    /// Parses the header, index and symbol body. The body may be followed by
    /// trailing bytes, which are ignored.
    pub(crate) fn read_from(bytes: &[u8]) -> Result<Self, MetadataError> {
        let header = bytes.get(..2).ok_or(MetadataError::UnexpectedEof {
            expected: 2,
            actual: bytes.len(),
        })?;
        let num_entries = u16::from_be_bytes([header[0], header[1]]);
        if num_entries == 0 || num_entries > MAX_METADATA_ENTRIES {
            return Err(MetadataError::InvalidEntryCount(num_entries));
        }
        let num_entries = num_entries as usize;

        let index_end = 2 + num_entries * 6;
        let index = bytes
            .get(2..index_end)
            .ok_or(MetadataError::UnexpectedEof {
                expected: index_end,
                actual: bytes.len(),
            })?;

        let mut data_position = Vec::with_capacity(num_entries);
        let mut calling_code = Vec::with_capacity(num_entries);
        let mut region_to_index = HashMap::with_capacity(num_entries);
        let mut non_geo_to_index = HashMap::new();
        let mut pos: u32 = 0;
        for i in 0..num_entries {
            let entry = &index[i * 6..i * 6 + 6];
            let id = u16::from_be_bytes([entry[0], entry[1]]);
            let buf_len = u16::from_be_bytes([entry[2], entry[3]]);
            let flags = u16::from_be_bytes([entry[4], entry[5]]);

            if id > MAX_NON_GEO_ID {
                // Two ASCII letters: high byte first.
                let region = String::from_utf8_lossy(&[(id >> 8) as u8, (id & 0xFF) as u8])
                    .into_owned();
                region_to_index.insert(region, i);
            } else {
                non_geo_to_index.insert(id as i32, i);
            }
            data_position.push(pos);
            pos += buf_len as u32;
            calling_code.push(flags);
        }

        // `pos` is now the total symbol count of the body.
        let body_len = (pos as usize * 5 + 7) / 8;
        let body_end = index_end + body_len;
        let byte_buf = bytes
            .get(index_end..body_end)
            .ok_or(MetadataError::UnexpectedEof {
                expected: body_end,
                actual: bytes.len(),
            })?
            .to_vec();

        Ok(Self {
            data_position,
            calling_code,
            byte_buf,
            region_to_index,
            non_geo_to_index,
            decoded: DashMap::new(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.data_position.len()
    }

    pub(crate) fn region_metadata(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        let index = *self.region_to_index.get(region_code)?;
        self.metadata_at(index, region_code)
    }

    pub(crate) fn non_geo_metadata(&self, country_calling_code: i32) -> Option<Arc<PhoneMetadata>> {
        let index = *self.non_geo_to_index.get(&country_calling_code)?;
        self.metadata_at(index, REGION_CODE_FOR_NON_GEO_ENTITY)
    }

    fn metadata_at(&self, index: usize, id: &str) -> Option<Arc<PhoneMetadata>> {
        if let Some(metadata) = self.decoded.get(&index) {
            return Some(metadata.value().clone());
        }
        // Two threads racing here both decode the same entry; the result is
        // identical, so last-write-wins is fine.
        let metadata = Arc::new(self.materialize(index, id)?);
        self.decoded.insert(index, metadata.clone());
        Some(metadata)
    }

    /// Decodes entry `index` into a fresh [`PhoneMetadata`], scanning the
    /// record for `;`-separated fields and expanding each value.
    pub(crate) fn materialize(&self, index: usize, id: &str) -> Option<PhoneMetadata> {
        let record = match codec::read_record(&self.byte_buf, self.data_position[index]) {
            Ok(record) => record,
            Err(err) => {
                error!("failed to decode metadata entry {}: {}", index, err);
                return None;
            }
        };

        let mut metadata = PhoneMetadata {
            id: id.to_owned(),
            ..PhoneMetadata::default()
        };

        let bytes = record.as_bytes();
        let mut field_code = 0u8;
        let mut value_start = 0usize;
        let mut at_field_start = true;
        let mut completed = false;
        for (i, &c) in bytes.iter().enumerate() {
            if at_field_start {
                field_code = c.wrapping_sub(b'A');
                at_field_start = false;
                value_start = i + 1;
            } else if c == b';' || c == b'\n' {
                if c == b';' && i > value_start && bytes[i - 1] == b'\\' {
                    // An escaped ';' belongs to the field value.
                    continue;
                }
                set_field(
                    &mut metadata,
                    field_code,
                    codec::expand_regex(&record[value_start..i]),
                );
                if c == b'\n' {
                    completed = true;
                    break;
                }
                at_field_start = true;
            }
        }
        if !completed {
            error!("incomplete metadata record for entry {}", index);
            return None;
        }

        let flags = self.calling_code[index];
        metadata.same_mobile_and_fixed_line_pattern = flags & FLAG_SAME_MOBILE_FIXED != 0;
        metadata.main_country_for_code = flags & FLAG_MAIN_COUNTRY_FOR_CODE != 0;
        metadata.leading_zero_possible = flags & FLAG_LEADING_ZERO_POSSIBLE != 0;
        metadata.mobile_number_portable_region = flags & FLAG_MOBILE_PORTABLE_REGION != 0;
        metadata.country_code = (flags & COUNTRY_CODE_MASK) as i32;
        Some(metadata)
    }
}

fn set_field(metadata: &mut PhoneMetadata, field_code: u8, pattern: String) {
    match field_code {
        0 => metadata.general_desc_possible = pattern,
        1 => metadata.general_desc = pattern,
        2 => metadata.fixed_line = pattern,
        3 => metadata.mobile = pattern,
        4 => metadata.toll_free = pattern,
        5 => metadata.premium_rate = pattern,
        6 => metadata.shared_cost = pattern,
        7 => metadata.personal_number = pattern,
        8 => metadata.voip = pattern,
        11 => metadata.international_prefix = pattern,
        21 => metadata.pager = pattern,
        23 => metadata.leading_digits = pattern,
        25 => metadata.uan = pattern,
        28 => metadata.voicemail = pattern,
        code => warn!("invalid field code in metadata record: {}", code),
    }
}
