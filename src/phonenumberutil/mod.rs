pub(crate) mod helper_constants;
mod enums;
mod errors;
mod helper_functions;
mod phone_number_regexps_and_mappings;
mod phonenumberutil;

pub use enums::PhoneNumberType;
pub use errors::{ParseError, ValidationError};
pub use phonenumberutil::PhoneNumberUtil;
