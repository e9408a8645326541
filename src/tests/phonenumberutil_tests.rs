use crate::{CountryCodeSource, ParseError, PhoneNumber, PhoneNumberType, PhoneNumberUtil, ValidationError};

use super::region_code::RegionCode;
use super::test_metadata::get_phone_util;

#[test]
fn get_supported_regions() {
    let phone_util = get_phone_util();
    assert_eq!(9, phone_util.get_supported_regions().count());
    assert!(phone_util
        .get_supported_regions()
        .any(|region| region == RegionCode::us()));
    assert!(!phone_util
        .get_supported_regions()
        .any(|region| region == RegionCode::un001()));
}

#[test]
fn get_supported_global_network_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util
        .get_supported_global_network_calling_codes()
        .collect::<Vec<_>>();
    assert_eq!(2, calling_codes.len());
    assert!(calling_codes.contains(&800));
    assert!(calling_codes.contains(&979));
    for code in calling_codes {
        assert_eq!(
            RegionCode::un001(),
            phone_util.get_region_code_for_country_code(code)
        );
    }
}

#[test]
fn get_supported_calling_codes() {
    let phone_util = get_phone_util();
    let calling_codes = phone_util.get_supported_calling_codes().collect::<Vec<_>>();
    assert_eq!(10, calling_codes.len());
    for code in &calling_codes {
        assert!(*code > 0);
        assert_ne!(
            RegionCode::zz(),
            phone_util.get_region_code_for_country_code(*code)
        );
    }
    assert!(calling_codes.contains(&979));
}

#[test]
fn region_and_country_code_round_trips() {
    let phone_util = get_phone_util();
    assert_eq!(RegionCode::us(), phone_util.get_region_code_for_country_code(1));
    assert_eq!(RegionCode::gb(), phone_util.get_region_code_for_country_code(44));
    assert_eq!(RegionCode::un001(), phone_util.get_region_code_for_country_code(800));
    assert_eq!(RegionCode::zz(), phone_util.get_region_code_for_country_code(2));

    let regions = phone_util.get_region_codes_for_country_calling_code(1);
    assert_eq!(vec![RegionCode::us(), RegionCode::bs()], regions);
    assert!(phone_util.get_region_codes_for_country_calling_code(2).is_empty());

    // The first region of a shared calling code is its main country.
    for region in phone_util.get_supported_regions() {
        let country_code = phone_util.get_country_code_for_region(region);
        assert!(country_code >= 1 && country_code <= 999);
        let main_region = phone_util.get_region_code_for_country_code(country_code);
        assert_eq!(
            country_code,
            phone_util.get_country_code_for_region(main_region)
        );
        assert_eq!(
            main_region,
            phone_util.get_region_codes_for_country_calling_code(country_code)[0]
        );
    }

    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::zz()));
    assert_eq!(0, phone_util.get_country_code_for_region(RegionCode::un001()));
}

#[test]
fn is_nanpa_country() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_nanpa_country(RegionCode::us()));
    assert!(phone_util.is_nanpa_country(RegionCode::bs()));
    assert!(!phone_util.is_nanpa_country(RegionCode::gb()));
}

#[test]
fn is_viable_phone_number() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_viable_phone_number("12"));
    assert!(phone_util.is_viable_phone_number("+1 650 253 0000"));
    assert!(phone_util.is_viable_phone_number("1-800-FLOWERS"));
    assert!(phone_util.is_viable_phone_number("0800 123 456"));
    assert!(phone_util.is_viable_phone_number("\u{FF0B}16502530000"));

    assert!(!phone_util.is_viable_phone_number(""));
    assert!(!phone_util.is_viable_phone_number("1"));
    assert!(!phone_util.is_viable_phone_number("+"));
    // Two digits are only viable without punctuation.
    assert!(!phone_util.is_viable_phone_number("1 2"));
    assert!(!phone_util.is_viable_phone_number("www.google.com"));
}

#[test]
fn normalise_remove_punctuation() {
    let phone_util = get_phone_util();
    assert_eq!("03456234", phone_util.normalize("034-56&+#2\u{AD}34"));
}

#[test]
fn normalise_replace_alpha_characters() {
    let phone_util = get_phone_util();
    assert_eq!("034426486479", phone_util.normalize("034-I-am-HUNGRY"));
    assert_eq!("18003569377", phone_util.normalize("1-800-FLOWERS"));
}

#[test]
fn normalise_folds_unicode_digits() {
    let phone_util = get_phone_util();
    assert_eq!("6502530000", phone_util.normalize("\u{FF16}\u{FF15}\u{FF10}2530000"));
    assert_eq!("1234", phone_util.normalize_digits_only("1a2b3c4"));
    assert_eq!(
        "+16502530000",
        phone_util.normalize_diallable_chars_only("+1 (650) 253-0000#")
    );
    assert_eq!("*1234", phone_util.normalize_diallable_chars_only("*12-34"));
    assert_eq!("10", phone_util.normalize_diallable_chars_only("\u{FF11}0"));
}

#[test]
fn parse_us_number_in_international_format() {
    let phone_util = get_phone_util();
    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1);
    us_number.set_national_number(6502530000);

    let test_number = phone_util.parse("+1 650 253 0000", RegionCode::us()).unwrap();
    assert_eq!(us_number, test_number);
    assert!(!test_number.italian_leading_zero());

    assert_eq!(
        Some(RegionCode::us()),
        phone_util.get_region_code_for_number(&test_number)
    );
    assert_eq!(
        PhoneNumberType::FixedLineOrMobile,
        phone_util.get_number_type(&test_number)
    );
    assert!(phone_util.is_valid_number(&test_number));
}

#[test]
fn parse_national_number_with_default_region_country_code() {
    let phone_util = get_phone_util();
    // The national prefix is not stripped in this build: the leading zero is
    // carried in the leading-zero fields and the patterns account for it.
    let mut ch_number = PhoneNumber::new();
    ch_number.set_country_code(41);
    ch_number.set_national_number(446681800);
    ch_number.set_italian_leading_zero(true);

    let test_number = phone_util.parse("044 668 18 00", RegionCode::ch()).unwrap();
    assert_eq!(ch_number, test_number);
    assert_eq!(
        PhoneNumberType::FixedLine,
        phone_util.get_number_type(&test_number)
    );
}

#[test]
fn parse_gb_toll_free_number() {
    let phone_util = get_phone_util();
    let test_number = phone_util.parse("0800 123 456", RegionCode::gb()).unwrap();
    assert_eq!(44, test_number.country_code());
    assert_eq!(800123456, test_number.national_number());
    assert!(test_number.italian_leading_zero());
    assert_eq!(1, test_number.number_of_leading_zeros());
    assert_eq!(
        "0800123456",
        PhoneNumberUtil::get_national_significant_number(&test_number)
    );
    assert_eq!(
        PhoneNumberType::TollFree,
        phone_util.get_number_type(&test_number)
    );
    assert!(phone_util.is_valid_number(&test_number));
}

#[test]
fn parse_international_number_with_unknown_default_region() {
    let phone_util = get_phone_util();
    let test_number = phone_util.parse("+390236618300", RegionCode::zz()).unwrap();
    assert_eq!(39, test_number.country_code());
    assert_eq!(236618300, test_number.national_number());
    assert!(test_number.italian_leading_zero());
    assert_eq!(
        Some(RegionCode::it()),
        phone_util.get_region_code_for_number(&test_number)
    );
    assert!(phone_util.is_valid_number(&test_number));
}

#[test]
fn parse_non_geographical_number() {
    let phone_util = get_phone_util();
    let test_number = phone_util.parse("+80012345678", RegionCode::zz()).unwrap();
    assert_eq!(800, test_number.country_code());
    assert_eq!(12345678, test_number.national_number());
    assert_eq!(
        Some(RegionCode::un001()),
        phone_util.get_region_code_for_number(&test_number)
    );
    assert_eq!(
        PhoneNumberType::TollFree,
        phone_util.get_number_type(&test_number)
    );
    assert!(phone_util.is_valid_number(&test_number));
    assert!(phone_util.is_valid_number_for_region(&test_number, RegionCode::un001()));

    let premium = phone_util.parse("+979 123 456 789", RegionCode::zz()).unwrap();
    assert_eq!(
        PhoneNumberType::PremiumRate,
        phone_util.get_number_type(&premium)
    );
}

#[test]
fn parse_resolves_shared_calling_code_by_region_rules() {
    let phone_util = get_phone_util();

    // A Bahamas number: rejected by the US general pattern, claimed by the
    // BS leading digits.
    let bs_number = phone_util.parse("+1 242 357 0000", RegionCode::zz()).unwrap();
    assert_eq!(
        Some(RegionCode::bs()),
        phone_util.get_region_code_for_number(&bs_number)
    );
    assert!(phone_util.is_valid_number_for_region(&bs_number, RegionCode::bs()));
    assert!(!phone_util.is_valid_number_for_region(&bs_number, RegionCode::us()));

    let us_number = phone_util.parse("+1 650 253 0000", RegionCode::zz()).unwrap();
    assert_eq!(
        Some(RegionCode::us()),
        phone_util.get_region_code_for_number(&us_number)
    );

    // A NANPA number no region claims.
    let mut unclaimed = PhoneNumber::new();
    unclaimed.set_country_code(1);
    unclaimed.set_national_number(7100000000);
    assert_eq!(None, phone_util.get_region_code_for_number(&unclaimed));
    assert!(!phone_util.is_valid_number(&unclaimed));
}

#[test]
fn parse_number_with_idd() {
    let phone_util = get_phone_util();
    let test_number = phone_util
        .parse_and_keep_raw_input("011 44 2087654321", RegionCode::us())
        .unwrap();
    assert_eq!(44, test_number.country_code());
    assert_eq!(2087654321, test_number.national_number());
    assert_eq!(
        CountryCodeSource::FromNumberWithIdd,
        test_number.country_code_source()
    );
    assert_eq!(
        PhoneNumberType::FixedLine,
        phone_util.get_number_type(&test_number)
    );

    // The AU IDD is 0011.
    let test_number = phone_util
        .parse_and_keep_raw_input("0011 54 9 11 8765 4321", RegionCode::au())
        .unwrap();
    assert_eq!(54, test_number.country_code());
    assert_eq!(91187654321, test_number.national_number());
    assert_eq!(
        CountryCodeSource::FromNumberWithIdd,
        test_number.country_code_source()
    );
}

#[test]
fn idd_followed_by_zero_is_not_stripped() {
    let phone_util = get_phone_util();
    // Country calling codes cannot begin with 0, so "011" followed by a zero
    // is not treated as an international prefix.
    let test_number = phone_util
        .parse_and_keep_raw_input("011 012 3456 7890", RegionCode::us())
        .unwrap();
    assert_eq!(1, test_number.country_code());
    assert_eq!(
        CountryCodeSource::FromDefaultCountry,
        test_number.country_code_source()
    );
    assert_eq!(
        "01101234567890",
        PhoneNumberUtil::get_national_significant_number(&test_number)
    );
}

#[test]
fn parse_number_starting_with_default_country_code() {
    let phone_util = get_phone_util();
    let test_number = phone_util
        .parse_and_keep_raw_input("1 650 253 0000", RegionCode::us())
        .unwrap();
    assert_eq!(1, test_number.country_code());
    assert_eq!(6502530000, test_number.national_number());
    assert_eq!(
        CountryCodeSource::FromNumberWithoutPlusSign,
        test_number.country_code_source()
    );
}

#[test]
fn parse_and_keep_raw() {
    let phone_util = get_phone_util();
    let mut alpha_numeric_number = PhoneNumber::new();
    alpha_numeric_number.set_country_code(1);
    alpha_numeric_number.set_national_number(80074935247);
    alpha_numeric_number.set_raw_input("800 six-flags".to_string());
    alpha_numeric_number.set_country_code_source(CountryCodeSource::FromDefaultCountry);

    let test_number = phone_util
        .parse_and_keep_raw_input("800 six-flags", RegionCode::us())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);

    alpha_numeric_number.set_national_number(8007493524);
    alpha_numeric_number.set_raw_input("1800 six-flag".to_string());
    alpha_numeric_number.set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
    let test_number = phone_util
        .parse_and_keep_raw_input("1800 six-flag", RegionCode::us())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);

    alpha_numeric_number.set_raw_input("+1800 six-flag".to_string());
    alpha_numeric_number.set_country_code_source(CountryCodeSource::FromNumberWithPlusSign);
    let test_number = phone_util
        .parse_and_keep_raw_input("+1800 six-flag", RegionCode::gb())
        .unwrap();
    assert_eq!(alpha_numeric_number, test_number);

    // Plain parse records neither the raw input nor the code source.
    let test_number = phone_util.parse("800 six-flags", RegionCode::us()).unwrap();
    assert!(!test_number.has_raw_input());
    assert!(!test_number.has_country_code_source());
}

#[test]
fn parse_reuses_a_phone_number_value() {
    let phone_util = get_phone_util();
    let mut phone_number = PhoneNumber::new();
    phone_util
        .parse_into("0800 123 456", RegionCode::gb(), &mut phone_number)
        .unwrap();
    assert!(phone_number.italian_leading_zero());

    // Stale fields from the previous parse must not leak into the next one.
    phone_util
        .parse_into("+1 650 253 0000", RegionCode::us(), &mut phone_number)
        .unwrap();
    assert_eq!(1, phone_number.country_code());
    assert_eq!(6502530000, phone_number.national_number());
    assert!(!phone_number.italian_leading_zero());
}

#[test]
fn parse_italian_leading_zeros() {
    let phone_util = get_phone_util();
    let mut zeros_number = PhoneNumber::new();
    zeros_number.set_country_code(61);

    zeros_number.set_national_number(11);
    zeros_number.set_italian_leading_zero(true);
    let test_number = phone_util.parse("011", RegionCode::au()).unwrap();
    assert_eq!(zeros_number, test_number);

    zeros_number.set_national_number(1);
    zeros_number.set_italian_leading_zero(true);
    zeros_number.set_number_of_leading_zeros(2);
    let test_number = phone_util.parse("001", RegionCode::au()).unwrap();
    assert_eq!(zeros_number, test_number);

    // The number "000" has 2 leading zeros; the last zero is the number.
    zeros_number.set_national_number(0);
    zeros_number.set_italian_leading_zero(true);
    zeros_number.set_number_of_leading_zeros(2);
    let test_number = phone_util.parse("000", RegionCode::au()).unwrap();
    assert_eq!(zeros_number, test_number);

    zeros_number.set_national_number(0);
    zeros_number.set_italian_leading_zero(true);
    zeros_number.set_number_of_leading_zeros(3);
    let test_number = phone_util.parse("0000", RegionCode::au()).unwrap();
    assert_eq!(zeros_number, test_number);
}

#[test]
fn failed_parse_on_invalid_numbers() {
    let phone_util = get_phone_util();

    assert_eq!(
        Err(ParseError::NotANumber),
        phone_util.parse("This is not a phone number", RegionCode::us())
    );
    assert_eq!(
        Err(ParseError::NotANumber),
        phone_util.parse("+", RegionCode::us())
    );
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("+999 12345", RegionCode::us())
    );
    // A valid region is required when the number is not international.
    assert_eq!(
        Err(ParseError::InvalidCountryCode),
        phone_util.parse("123 456 7890", RegionCode::zz())
    );
    // 21 digits exceed the maximum NSN length.
    assert_eq!(
        Err(ParseError::TooLong),
        phone_util.parse("650253000000000000000", RegionCode::us())
    );
    // Overlong garbage is cut off before the regex engine ever sees it.
    let overlong = "1".repeat(251);
    assert_eq!(
        Err(ParseError::TooLong),
        phone_util.parse(&overlong, RegionCode::us())
    );
    // An IDD leaving at most two digits cannot be a viable number.
    assert_eq!(
        Err(ParseError::TooShortAfterIdd),
        phone_util.parse("011 12", RegionCode::us())
    );
    // A recognized country calling code followed by a one-digit NSN.
    assert_eq!(
        Err(ParseError::TooShortNsn),
        phone_util.parse("+491", RegionCode::us())
    );
}

#[test]
fn is_valid_number() {
    let phone_util = get_phone_util();
    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1);
    us_number.set_national_number(6502530000);
    assert!(phone_util.is_valid_number(&us_number));

    let mut it_number = PhoneNumber::new();
    it_number.set_country_code(39);
    it_number.set_national_number(236618300);
    it_number.set_italian_leading_zero(true);
    assert!(phone_util.is_valid_number(&it_number));
}

#[test]
fn is_not_valid_number() {
    let phone_util = get_phone_util();
    // Subscriber-number-only input is possible but not valid.
    let mut us_number = PhoneNumber::new();
    us_number.set_country_code(1);
    us_number.set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&us_number));
    assert!(phone_util.is_possible_number(&us_number));

    let mut unknown = PhoneNumber::new();
    unknown.set_country_code(0);
    unknown.set_national_number(2530000);
    assert!(!phone_util.is_valid_number(&unknown));
}

#[test]
fn is_valid_number_for_region() {
    let phone_util = get_phone_util();
    let mut gb_number = PhoneNumber::new();
    gb_number.set_country_code(44);
    gb_number.set_national_number(2087654321);
    assert!(phone_util.is_valid_number_for_region(&gb_number, RegionCode::gb()));
    // The calling code does not match the region.
    assert!(!phone_util.is_valid_number_for_region(&gb_number, RegionCode::us()));
    assert!(!phone_util.is_valid_number_for_region(&gb_number, RegionCode::zz()));
}

#[test]
fn is_possible_number_with_reason() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert_eq!(Ok(()), phone_util.is_possible_number_with_reason(&number));

    number.set_national_number(2530000);
    assert_eq!(Ok(()), phone_util.is_possible_number_with_reason(&number));

    number.set_country_code(0);
    assert_eq!(
        Err(ValidationError::InvalidCountryCode),
        phone_util.is_possible_number_with_reason(&number)
    );

    number.set_country_code(1);
    number.set_national_number(253000);
    assert_eq!(
        Err(ValidationError::TooShort),
        phone_util.is_possible_number_with_reason(&number)
    );

    number.set_national_number(65025300000);
    assert_eq!(
        Err(ValidationError::TooLong),
        phone_util.is_possible_number_with_reason(&number)
    );
}

#[test]
fn is_possible_number_for_string() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_possible_number_for_string("+1 650 253 0000", RegionCode::us()));
    assert!(phone_util.is_possible_number_for_string("253-0000", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("+999 12345", RegionCode::us()));
    assert!(!phone_util.is_possible_number_for_string("I want a pizza", RegionCode::us()));
}

#[test]
fn get_national_significant_number() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(6502530000);
    assert_eq!(
        "6502530000",
        PhoneNumberUtil::get_national_significant_number(&number)
    );

    number.set_country_code(39);
    number.set_national_number(236618300);
    number.set_italian_leading_zero(true);
    assert_eq!(
        "0236618300",
        PhoneNumberUtil::get_national_significant_number(&number)
    );
}

#[test]
fn get_national_significant_number_many_leading_zeros() {
    let mut number = PhoneNumber::new();
    number.set_country_code(1);
    number.set_national_number(650);
    number.set_italian_leading_zero(true);
    number.set_number_of_leading_zeros(2);
    assert_eq!(
        "00650",
        PhoneNumberUtil::get_national_significant_number(&number)
    );

    // Malicious input is clamped rather than crashing.
    number.set_number_of_leading_zeros(-3);
    assert_eq!(
        "650",
        PhoneNumberUtil::get_national_significant_number(&number)
    );
}

#[test]
fn is_number_geographical() {
    let phone_util = get_phone_util();
    let mut number = PhoneNumber::new();
    number.set_country_code(41);
    number.set_national_number(446681800);
    number.set_italian_leading_zero(true);
    assert!(phone_util.is_number_geographical(&number));

    // A GB toll-free number has no geography.
    let toll_free = phone_util.parse("0800 123 456", RegionCode::gb()).unwrap();
    assert!(!phone_util.is_number_geographical(&toll_free));
}

#[test]
fn is_leading_zero_possible() {
    let phone_util = get_phone_util();
    assert!(phone_util.is_leading_zero_possible(39));
    assert!(!phone_util.is_leading_zero_possible(1));
    assert!(!phone_util.is_leading_zero_possible(2));
}

#[test]
fn maybe_strip_international_prefix() {
    let phone_util = get_phone_util();

    let mut number = "+441234567890".to_string();
    assert_eq!(
        CountryCodeSource::FromNumberWithPlusSign,
        phone_util.maybe_strip_international_prefix_and_normalize(&mut number, "011")
    );
    assert_eq!("441234567890", number);

    let mut number = "00441234567890".to_string();
    assert_eq!(
        CountryCodeSource::FromNumberWithIdd,
        phone_util.maybe_strip_international_prefix_and_normalize(&mut number, "00")
    );
    assert_eq!("441234567890", number);

    // The digit after the prefix may not be a zero.
    let mut number = "0001234567".to_string();
    assert_eq!(
        CountryCodeSource::FromDefaultCountry,
        phone_util.maybe_strip_international_prefix_and_normalize(&mut number, "00")
    );
    assert_eq!("0001234567", number);

    let mut number = "6502530000".to_string();
    assert_eq!(
        CountryCodeSource::FromDefaultCountry,
        phone_util.maybe_strip_international_prefix_and_normalize(&mut number, "011")
    );
    assert_eq!("6502530000", number);
}

#[test]
fn maybe_extract_country_code() {
    let phone_util = get_phone_util();
    let metadata_source =
        crate::SingleFileMetadataSource::from_bytes(super::test_metadata::test_metadata());
    let metadata = crate::interfaces::MetadataSource::metadata_for_region(
        &metadata_source,
        RegionCode::us(),
    )
    .unwrap();

    let mut national_number = String::new();
    let mut phone_number = PhoneNumber::new();
    let country_code = phone_util
        .maybe_extract_country_code(
            "011 44 1632 960961",
            Some(metadata.as_ref()),
            &mut national_number,
            true,
            &mut phone_number,
        )
        .unwrap();
    assert_eq!(44, country_code);
    assert_eq!("1632960961", national_number);
    assert_eq!(
        CountryCodeSource::FromNumberWithIdd,
        phone_number.country_code_source()
    );

    // No prefix and no match against the default region: no code extracted.
    let mut national_number = String::new();
    let mut phone_number = PhoneNumber::new();
    let country_code = phone_util
        .maybe_extract_country_code(
            "650 253 0000",
            Some(metadata.as_ref()),
            &mut national_number,
            true,
            &mut phone_number,
        )
        .unwrap();
    assert_eq!(0, country_code);
    assert_eq!(
        CountryCodeSource::FromDefaultCountry,
        phone_number.country_code_source()
    );
}
