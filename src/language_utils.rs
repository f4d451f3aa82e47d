use anyhow::{anyhow, Result};
use isolang::Language;

// Language code helpers
//
// Accepts ISO 639-1 (2-letter) and ISO 639-2 (3-letter, T or B form) codes,
// plus regional variants like `en-GB` / `pt_BR`, and maps them to the codes
// DeepL expects.

/// ISO 639-2/B codes that differ from their 639-2/T form
const PART2B_TO_PART2T: [(&str, &str); 18] = [
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Target variants DeepL accepts verbatim (after upper-casing)
const DEEPL_REGIONAL_TARGETS: [&str; 6] = ["EN-GB", "EN-US", "PT-BR", "PT-PT", "ZH-HANS", "ZH-HANT"];

/// Split `en-GB` / `pt_BR` into the base code and an optional region
fn split_region(code: &str) -> (String, Option<String>) {
    let code = code.trim().replace('_', "-");
    match code.split_once('-') {
        Some((base, region)) => (base.to_lowercase(), Some(region.to_uppercase())),
        None => (code.to_lowercase(), None),
    }
}

fn lookup(code: &str) -> Option<Language> {
    let (base, _) = split_region(code);
    match base.len() {
        2 => Language::from_639_1(&base),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == base)
                .map(|(_, t)| *t)
                .unwrap_or(base.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a language code, returning the language it names
pub fn validate_language_code(code: &str) -> Result<Language> {
    lookup(code).ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize to ISO 639-1 when one exists, otherwise ISO 639-2/T
pub fn normalize_to_part1_or_part2t(code: &str) -> Result<String> {
    let lang = validate_language_code(code)?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    Ok(validate_language_code(code)?.to_name().to_string())
}

/// DeepL `target_lang` value for a code.
///
/// English and Portuguese need a regional variant as targets; the plain
/// codes map to `EN-US` and `PT-PT`.
pub fn to_deepl_target_code(code: &str) -> Result<String> {
    let (_, region) = split_region(code);
    let base = normalize_to_part1_or_part2t(code)?.to_uppercase();

    if let Some(region) = region {
        let regional = format!("{}-{}", base, region);
        if DEEPL_REGIONAL_TARGETS.contains(&regional.as_str()) {
            return Ok(regional);
        }
    }

    Ok(match base.as_str() {
        "EN" => "EN-US".to_string(),
        "PT" => "PT-PT".to_string(),
        _ => base,
    })
}

/// DeepL `source_lang` value for a code (base language only)
pub fn to_deepl_source_code(code: &str) -> Result<String> {
    Ok(normalize_to_part1_or_part2t(code)?.to_uppercase())
}
