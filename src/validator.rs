/// Substrings that mark a letters-only token as a plausible promo code.
pub const DISCOUNT_WORDS: &[&str] = &[
    "SAVE", "OFF", "DEAL", "SALE", "PROMO", "WELCOME", "GET", "FREE", "BOGO", "SHIP",
];

/// Tokens that show up in code-like positions but never are codes.
pub const FALSE_POSITIVES: &[&str] = &[
    // email / web
    "EMAIL", "EMAILS", "HTTP", "HTTPS", "HTML", "WWW", "CLICK", "LINK", "LINKS", "HERE",
    "VIEW", "BROWSER", "WEBSITE", "ONLINE", "UNSUBSCRIBE", "SUBSCRIBE", "INBOX", "REPLY",
    "NOREPLY", "MOBILE", "APP", "DOWNLOAD", "LOGIN", "PASSWORD",
    // business
    "SERVICE", "SERVICES", "ACCOUNT", "SUPPORT", "CUSTOMER", "CUSTOMERS", "PRIVACY",
    "POLICY", "TERMS", "CONDITIONS", "COMPANY", "CONTACT", "ADDRESS", "ORDER", "ORDERS",
    "NUMBER", "DETAILS", "MEMBER", "MEMBERS", "REWARDS", "STORE", "STORES", "TEAM",
    // noisy content
    "LIVE", "READY", "CREDIT", "INSIGHTS", "AVAILABLE", "TODAY", "TONIGHT", "NOW", "NEW",
    "MORE", "LEARN", "SHOP", "BOOK", "CHECKOUT", "CODE", "CODES", "COUPON", "VOUCHER",
    "DISCOUNT", "OFFER", "OFFERS", "SALE", "SALES", "DEAL", "DEALS", "SAVE", "SAVINGS",
    "FREE", "SHIPPING", "PROMO", "PROMOS", "WELCOME", "GET", "BOGO",
];

fn contains_discount_word(upper: &str) -> bool {
    DISCOUNT_WORDS.iter().any(|w| upper.contains(w))
}

/// Decide whether a scanned candidate is a real promo code.
pub fn is_valid_code(candidate: &str) -> bool {
    let upper = candidate.to_uppercase();
    let len = upper.chars().count();
    if !(4..=20).contains(&len) {
        return false;
    }
    if FALSE_POSITIVES.contains(&upper.as_str()) {
        return false;
    }
    if upper.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let has_digit = upper.chars().any(|c| c.is_ascii_digit());
    let has_discount_word = contains_discount_word(&upper);
    if !has_digit && !has_discount_word {
        return false;
    }
    if upper.chars().all(|c| c.is_alphabetic()) && !has_discount_word {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_typical_codes() {
        assert!(is_valid_code("SAVE20"));
        assert!(is_valid_code("FLIGHT40"));
        assert!(is_valid_code("BOGO2024"));
        assert!(is_valid_code("SHIP15FREE"));
        assert!(is_valid_code("FREESHIP"));
        assert!(is_valid_code("save25now"));
    }

    #[test]
    fn test_rejects_length_out_of_bounds() {
        assert!(!is_valid_code("AB1"));
        assert!(!is_valid_code("SAVE1234567890ABCDEFG"));
        assert!(is_valid_code("SAVE1234567890ABCDEF"));
    }

    #[test]
    fn test_rejects_all_digits() {
        assert!(!is_valid_code("12345678"));
        assert!(!is_valid_code("2025"));
    }

    #[test]
    fn test_rejects_false_positive_lexicon() {
        for word in ["LIVE", "READY", "SERVICE", "AVAILABLE", "email", "Click", "CREDIT"] {
            assert!(!is_valid_code(word), "{word} should be rejected");
        }
    }

    #[test]
    fn test_rejects_plain_words() {
        assert!(!is_valid_code("HELLO"));
        assert!(!is_valid_code("WEEKEND"));
    }

    #[test]
    fn test_lexicon_entries_never_validate() {
        for word in FALSE_POSITIVES {
            assert!(!is_valid_code(word), "{word} should be rejected");
        }
    }
}
