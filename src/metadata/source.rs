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

use std::io::{self, Read};
use std::sync::{Arc, Mutex, OnceLock};

use log::{error, warn};

use crate::interfaces::MetadataSource;

use super::{PhoneMetadata, PhoneMetadataCollection};

/// A [`MetadataSource`] that reads the whole metadata from a single byte
/// stream.
///
/// The stream is consumed and decoded exactly once, on first lookup;
/// initialization is safe under concurrent first access. Corrupt or empty
/// metadata is an unrecoverable invariant violation of the data file: it is
/// logged and then panics, since no lookup can ever succeed against it.
pub struct SingleFileMetadataSource {
    source: Mutex<Option<Box<dyn Read + Send>>>,
    collection: OnceLock<PhoneMetadataCollection>,
}

impl SingleFileMetadataSource {
    pub fn new<R: Read + Send + 'static>(source: R) -> Self {
        Self {
            source: Mutex::new(Some(Box::new(source))),
            collection: OnceLock::new(),
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::new(io::Cursor::new(bytes))
    }

    fn collection(&self) -> &PhoneMetadataCollection {
        self.collection.get_or_init(|| {
            let source = self.source.lock().ok().and_then(|mut guard| guard.take());
            let mut bytes = Vec::new();
            if let Some(mut source) = source {
                if let Err(err) = source.read_to_end(&mut bytes) {
                    // A partial read surfaces below as a decode failure.
                    warn!("error reading metadata stream: {}", err);
                }
            }
            match PhoneMetadataCollection::read_from(&bytes) {
                Ok(collection) => collection,
                Err(err) => {
                    error!("empty or invalid metadata: {}", err);
                    panic!("empty or invalid metadata: {}", err);
                }
            }
        })
    }
}

impl MetadataSource for SingleFileMetadataSource {
    fn metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>> {
        self.collection().region_metadata(region_code)
    }

    fn metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<Arc<PhoneMetadata>> {
        self.collection().non_geo_metadata(country_calling_code)
    }
}
