/*!
 * Tests for locale code utilities
 */

use postmill::language_utils::{
    LanguageCodeType, get_language_name, is_auto, language_codes_match, normalize_to_part1_or_part2t,
    normalize_to_part2t, primary_subtag, validate_language_code, validate_source_language,
};

#[test]
fn test_validate_language_code_withVariousCodes_shouldClassify() {
    assert_eq!(validate_language_code("zh").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("zho").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("chi").unwrap(), LanguageCodeType::Part2B);
    assert_eq!(validate_language_code("zh-CN").unwrap(), LanguageCodeType::Part1);
    assert!(validate_language_code("zz").is_err());
    assert!(validate_language_code("").is_err());
}

#[test]
fn test_validate_source_language_withAuto_shouldAccept() {
    assert!(validate_source_language("auto").is_ok());
    assert!(validate_source_language(" AUTO ").is_ok());
    assert!(validate_language_code("auto").is_err());
    assert!(is_auto("Auto"));
}

#[test]
fn test_primary_subtag_shouldStripRegion() {
    assert_eq!(primary_subtag("zh-TW"), "zh");
    assert_eq!(primary_subtag("pt_BR"), "pt");
    assert_eq!(primary_subtag(" EN "), "en");
}

#[test]
fn test_normalize_shouldConvertBetweenForms() {
    assert_eq!(normalize_to_part2t("zh-CN").unwrap(), "zho");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part1_or_part2t("chi").unwrap(), "zh");
    assert!(normalize_to_part2t("zz").is_err());
}

#[test]
fn test_language_codes_match_withRegionTags_shouldCompareLanguage() {
    assert!(language_codes_match("zh-CN", "zh-TW"));
    assert!(language_codes_match("zh", "chi"));
    assert!(!language_codes_match("zh", "en"));
    assert!(!language_codes_match("zz", "zz"));
}

#[test]
fn test_get_language_name_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("auto").unwrap(), "Auto-detected");
    assert!(get_language_name("zz").is_err());
}
