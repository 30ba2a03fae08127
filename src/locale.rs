//! Locale tag parsing.
//!
//! Tags are split into at most three dash-delimited segments. Malformed tags
//! are an ordinary input condition, so parsing reports them as `None` rather
//! than as an error.

/// Language, region and variant parsed from a tag. Any segment may be empty.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct LocaleTag {
    pub language: String,
    pub region: String,
    pub variant: String,
}

impl LocaleTag {
    pub fn new(
        language: impl Into<String>,
        region: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into(),
            region: region.into(),
            variant: variant.into(),
        }
    }
}

/// Returns true when `value` holds only ASCII letters. Empty is valid.
pub fn is_alpha(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Parse `tag` as `language[-region[-variant]]`.
///
/// Only the first two dashes split; anything after the second dash belongs
/// to the variant, which then fails validation if it contains another dash.
/// A dash directly after the first one does not split, so `en--POSIX`
/// keeps `-POSIX` as its region and is rejected.
pub fn parse_locale_tag(tag: &str) -> Option<LocaleTag> {
    let (language, region, variant) = match tag.split_once('-') {
        None => (tag, "", ""),
        Some((language, remainder)) => match remainder.find('-') {
            Some(dash) if dash > 0 => (language, &remainder[..dash], &remainder[dash + 1..]),
            _ => (language, remainder, ""),
        },
    };

    if !is_alpha(language) || !is_alpha(region) || !is_alpha(variant) {
        return None;
    }

    Some(LocaleTag::new(language, region, variant))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_accepts_only_ascii_letters() {
        assert!(is_alpha(""));
        assert!(is_alpha("abcXYZ"));
        assert!(!is_alpha("en1"));
        assert!(!is_alpha("x-y"));
        assert!(!is_alpha("é"));
    }

    #[test]
    fn language_only() {
        assert_eq!(parse_locale_tag("en"), Some(LocaleTag::new("en", "", "")));
    }

    #[test]
    fn language_and_region() {
        assert_eq!(
            parse_locale_tag("en-US"),
            Some(LocaleTag::new("en", "US", ""))
        );
    }

    #[test]
    fn language_region_and_variant() {
        assert_eq!(
            parse_locale_tag("zh-Hans-CN"),
            Some(LocaleTag::new("zh", "Hans", "CN"))
        );
    }

    #[test]
    fn rejects_non_letter_variant() {
        assert_eq!(parse_locale_tag("en-US-x1!"), None);
    }

    #[test]
    fn empty_tag_is_all_empty_segments() {
        assert_eq!(parse_locale_tag(""), Some(LocaleTag::default()));
    }

    #[test]
    fn trailing_and_leading_dashes_leave_empty_segments() {
        assert_eq!(parse_locale_tag("en-"), Some(LocaleTag::new("en", "", "")));
        assert_eq!(parse_locale_tag("-US"), Some(LocaleTag::new("", "US", "")));
        assert_eq!(parse_locale_tag("-US-"), Some(LocaleTag::new("", "US", "")));
    }

    #[test]
    fn empty_region_before_variant_is_rejected() {
        assert_eq!(parse_locale_tag("en--POSIX"), None);
        assert_eq!(parse_locale_tag("--"), None);
    }

    #[test]
    fn extra_segments_fail_validation() {
        assert_eq!(parse_locale_tag("zh-Hans-CN-x"), None);
        assert_eq!(parse_locale_tag("en-419"), None);
        assert_eq!(parse_locale_tag("e n"), None);
    }
}
