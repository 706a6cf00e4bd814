//! Language utilities for locale handling
//!
//! Posts are addressed by short locale codes (`zh`, `en`) while the
//! translation endpoint also accepts region tags such as `zh-CN` or `zh-TW`.
//! The helpers here validate and compare both forms through the primary
//! ISO 639 subtag.

use anyhow::{Result, anyhow};
use isolang::Language;

/// Source language placeholder that asks the provider to detect the language
pub const AUTO_DETECT: &str = "auto";

/// Language code type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-2/T (3-letter) code
    Part2T,
    /// ISO 639-2/B (3-letter) code
    Part2B,
}

/// Split a locale tag like `zh-CN` or `pt_BR` into its primary subtag
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Map ISO 639-2/B bibliographic codes to their terminology form
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    let part2t = match code {
        "fre" => "fra",
        "ger" => "deu",
        "dut" => "nld",
        "gre" => "ell",
        "chi" => "zho",
        "cze" => "ces",
        "ice" => "isl",
        "alb" => "sqi",
        "arm" => "hye",
        "baq" => "eus",
        "bur" => "mya",
        "per" => "fas",
        "geo" => "kat",
        "may" => "msa",
        "mac" => "mkd",
        "rum" => "ron",
        "slo" => "slk",
        "wel" => "cym",
        _ => return None,
    };
    Some(part2t)
}

fn lookup(code: &str) -> Option<(Language, LanguageCodeType)> {
    let primary = primary_subtag(code);
    match primary.len() {
        2 => Language::from_639_1(&primary).map(|lang| (lang, LanguageCodeType::Part1)),
        3 => Language::from_639_3(&primary)
            .map(|lang| (lang, LanguageCodeType::Part2T))
            .or_else(|| {
                part2b_to_part2t(&primary)
                    .and_then(Language::from_639_3)
                    .map(|lang| (lang, LanguageCodeType::Part2B))
            }),
        _ => None,
    }
}

/// Validate a language code or locale tag
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    lookup(code)
        .map(|(_, kind)| kind)
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Validate a source language, which may also be `auto`
pub fn validate_source_language(code: &str) -> Result<()> {
    if is_auto(code) {
        return Ok(());
    }
    validate_language_code(code).map(|_| ())
}

/// Whether the code asks for language detection
pub fn is_auto(code: &str) -> bool {
    code.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    lookup(code)
        .map(|(lang, _)| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))
}

/// Normalize to ISO 639-1 where one exists, otherwise ISO 639-2/T
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let (lang, _) = lookup(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two codes refer to the same primary language (`zh-CN` matches `chi`)
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (normalize_to_part2t(code1), normalize_to_part2t(code2)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    if is_auto(code) {
        return Ok("Auto-detected".to_string());
    }
    let (lang, _) = lookup(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
