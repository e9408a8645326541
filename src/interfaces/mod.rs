use std::sync::Arc;

use crate::metadata::PhoneMetadata;

/// A source of phone metadata for different regions and non-geographical
/// entities, used to isolate the underlying storage format and allow
/// different implementations to be swapped in easily.
pub trait MetadataSource: Send + Sync {
    /// Returns the metadata for the given region, or `None` if the source
    /// has no entry for it. `region_code` will never be "001" here.
    fn metadata_for_region(&self, region_code: &str) -> Option<Arc<PhoneMetadata>>;

    /// Returns the metadata for a non-geographical entity denoted by its
    /// country calling code (e.g. 800), or `None` if there is no such entry.
    fn metadata_for_non_geographical_region(
        &self,
        country_calling_code: i32,
    ) -> Option<Arc<PhoneMetadata>>;
}

/// Internal phonenumber matching API used to isolate the underlying
/// implementation of the matcher and allow different implementations to be
/// swapped in easily.
pub(crate) trait MatcherApi: Send + Sync {
    /// Returns whether the given national number (a string containing only
    /// decimal digits) matches the national number pattern given as a regex
    /// source string.
    fn match_national_number(
        &self,
        number: &str,
        number_pattern: &str,
        allow_prefix_match: bool,
    ) -> bool;
}
