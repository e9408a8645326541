mod interfaces;
mod metadata;
mod phonenumber;
mod phonenumberutil;
mod regex_based_matcher;
mod regexp_cache;
pub mod i18n;
pub(crate) mod regex_util;

#[cfg(test)]
mod tests;

pub use interfaces::MetadataSource;
pub use metadata::{MetadataError, PhoneMetadata, SingleFileMetadataSource};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
pub use phonenumberutil::{ParseError, PhoneNumberType, PhoneNumberUtil, ValidationError};
