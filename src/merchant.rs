use std::sync::OnceLock;

use crate::error::Result;
use crate::fmt::{ellipsize, title_case};
use crate::models::UNKNOWN_MERCHANT;
use crate::rules::{self, LazyRegex};

const NO_REPLY_PREFIXES: &[&str] = &[
    "no-reply",
    "noreply",
    "no_reply",
    "do-not-reply",
    "donotreply",
];

/// Mailbox providers and role names that say nothing about the brand.
const GENERIC_DOMAINS: &[&str] = &[
    "gmail", "googlemail", "yahoo", "hotmail", "outlook", "live", "msn", "aol", "icloud", "me",
    "protonmail", "mail", "email", "info", "promo", "promos", "promotions", "deals", "offers",
    "news", "newsletter", "marketing", "mailer", "noreply", "notifications",
];

/// Sending-infrastructure subdomains stripped before the brand label.
const MARKETING_SUBDOMAINS: &[&str] = &[
    "e", "em", "email", "emails", "mail", "mailer", "mailing", "news", "newsletter", "info",
    "promo", "promos", "promotions", "offers", "deals", "marketing", "send", "reply", "click",
    "go", "m", "t", "comms", "hello",
];

/// Words that open a subject line without naming anyone.
const MARKETING_OPENERS: &[&str] = &[
    "explore", "discover", "save", "shop", "get", "grab", "don't", "dont", "last", "final",
    "hurry", "new", "introducing", "welcome", "your", "you", "our", "this", "the", "today",
    "limited", "flash", "big", "huge", "extra", "free", "buy", "enjoy", "meet", "celebrate",
    "reminder", "hey", "hi", "hello",
];

/// Capitalized words that are calls to action rather than brand names.
const MARKETING_VERBS: &[&str] = &[
    "get", "save", "shop", "your", "you", "buy", "enjoy", "take", "grab", "don't", "dont",
    "last", "new", "free", "up", "off", "extra", "limited", "exclusive", "special", "today",
    "now", "final", "hurry", "discover", "explore", "introducing", "check", "claim", "unlock",
    "our", "the", "this", "a", "an", "just", "only", "big", "huge", "sale", "deal", "deals",
    "offer", "offers", "inside", "welcome", "reminder", "it's", "here's", "there's",
];

const MAX_WORDS: usize = 3;
const MAX_WORD_CHARS: usize = 25;
const MAX_SUBJECT_CHARS: usize = 40;

static DISPLAY_NAME: LazyRegex = OnceLock::new();
static ADDRESS: LazyRegex = OnceLock::new();
static FROM_BY: LazyRegex = OnceLock::new();
static LEADING_SEPARATOR: LazyRegex = OnceLock::new();
static REPLY_PREFIX: LazyRegex = OnceLock::new();
static URGENCY: LazyRegex = OnceLock::new();
static AMOUNTS: LazyRegex = OnceLock::new();
static EXCLAMATIONS: LazyRegex = OnceLock::new();
static GREETING: LazyRegex = OnceLock::new();

fn from_display_name(sender: &str) -> Result<Option<String>> {
    let re = rules::regex(&DISPLAY_NAME, r#"^\s*([^<]*?)\s*<[^>]*>"#)?;
    let Some(caps) = re.captures(sender) else {
        return Ok(None);
    };
    let name = caps[1].trim().trim_matches(|c: char| c == '"' || c == '\'').trim();
    if name.is_empty() {
        return Ok(None);
    }
    let lower = name.to_lowercase();
    if NO_REPLY_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}

fn from_domain(sender: &str) -> Result<Option<String>> {
    let re = rules::regex(&ADDRESS, r"[A-Za-z0-9._%+-]+@([A-Za-z0-9._-]+\.[A-Za-z]{2,})")?;
    let Some(caps) = re.captures(sender) else {
        return Ok(None);
    };
    let host = caps[1].to_lowercase();
    let mut labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();

    // Drop the TLD, and the second level of country domains like co.uk.
    if let Some(tld) = labels.pop() {
        let country_sld = labels
            .last()
            .is_some_and(|sld| ["co", "com", "org", "net", "ac"].contains(sld));
        if tld.len() == 2 && labels.len() >= 2 && country_sld {
            labels.pop();
        }
    }
    while labels.len() > 1 && MARKETING_SUBDOMAINS.contains(&labels[0]) {
        labels.remove(0);
    }

    let Some(brand) = labels.last() else {
        return Ok(None);
    };
    if GENERIC_DOMAINS.contains(brand) {
        return Ok(None);
    }
    let name = title_case(brand);
    Ok((!name.is_empty()).then_some(name))
}

fn from_subject_attribution(subject: &str) -> Result<Option<String>> {
    let re = rules::regex(
        &FROM_BY,
        r"(?:^|\s)(?i:from|by)\s+([A-Z][A-Za-z0-9'&]*(?:\s+[A-Z][A-Za-z0-9'&]*){0,3})",
    )?;
    Ok(re.captures(subject).map(|caps| caps[1].trim().to_string()))
}

fn from_subject_separator(subject: &str) -> Result<Option<String>> {
    let re = rules::regex(
        &LEADING_SEPARATOR,
        r"^\s*([A-Z][A-Za-z0-9'&.]*(?:\s+[A-Z][A-Za-z0-9'&.]*){0,3})\s+[-|:\x{2013}\x{2014}]\s+\S",
    )?;
    let Some(caps) = re.captures(subject) else {
        return Ok(None);
    };
    let phrase = caps[1].trim();
    let first = phrase.split_whitespace().next().unwrap_or_default().to_lowercase();
    if MARKETING_OPENERS.contains(&first.as_str()) {
        return Ok(None);
    }
    Ok(Some(phrase.to_string()))
}

/// Strip emojis, reply prefixes, urgency phrases, amounts, repeated
/// exclamation marks and greetings from a subject line.
pub fn clean_subject(subject: &str) -> Result<String> {
    let text: String = subject
        .chars()
        .filter(|&c| {
            c.is_alphanumeric()
                || c.is_whitespace()
                || c.is_ascii_punctuation()
                || matches!(c, '\u{2019}' | '\u{2013}' | '\u{2014}')
        })
        .collect();

    let text = rules::regex(&REPLY_PREFIX, r"(?i)^\s*(?:(?:re|fwd?)\s*:\s*)+")?.replace(&text, "");
    let text = rules::regex(
        &GREETING,
        r"(?i)^\s*(?:(?:hi|hey|hello)\b[^,!.:]{0,20}[,!.:]+|psst\b[.!]*|(?:hi|hey|hello)\b)",
    )?
    .replace(&text, "");
    let text = rules::regex(
        &URGENCY,
        r"(?i)\b(?:last\s+chance|final\s+hours?|ends\s+(?:today|tonight|soon)|today\s+only|limited\s+time(?:\s+only)?|don'?t\s+miss(?:\s+out)?|hurry|act\s+fast|while\s+supplies\s+last|flash\s+sale)\b[:!.]*",
    )?
    .replace_all(&text, "");
    let text = rules::regex(
        &AMOUNTS,
        r"(?i)(?:\bup\s+to\s+)?(?:\d{1,3}%|\$\d+(?:\.\d{2})?)(?:\s*off\b)?",
    )?
    .replace_all(&text, "");
    let text = rules::regex(&EXCLAMATIONS, r"!{2,}")?.replace_all(&text, "");

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | '|' | ',' | '+' | '&'))
        .to_string())
}

fn is_marketing_verb(word: &str) -> bool {
    MARKETING_VERBS.contains(&word.to_lowercase().as_str())
}

fn leading_capitalized(cleaned: &str) -> Option<String> {
    let mut picked: Vec<&str> = Vec::new();
    let mut length = 0;
    for raw in cleaned.split_whitespace() {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '&');
        if word.is_empty() {
            if picked.is_empty() {
                continue;
            }
            break;
        }
        let capitalized = word.chars().next().is_some_and(|c| c.is_uppercase());
        if is_marketing_verb(word) {
            if picked.is_empty() {
                continue;
            }
            break;
        }
        if !capitalized {
            break;
        }
        let added = word.chars().count() + usize::from(!picked.is_empty());
        if length + added > MAX_WORD_CHARS {
            break;
        }
        picked.push(word);
        length += added;
        if picked.len() == MAX_WORDS || raw.ends_with([',', ':', '!', '?', '-']) {
            break;
        }
    }
    (!picked.is_empty()).then(|| picked.join(" "))
}

/// Derive a display brand for an email. Never returns an empty string.
pub fn resolve_merchant(subject: &str, sender: &str) -> Result<String> {
    if let Some(name) = from_display_name(sender)? {
        return Ok(name);
    }
    if let Some(name) = from_domain(sender)? {
        return Ok(name);
    }
    if let Some(name) = from_subject_attribution(subject)? {
        return Ok(name);
    }
    if let Some(name) = from_subject_separator(subject)? {
        return Ok(name);
    }

    let cleaned = clean_subject(subject)?;
    if let Some(name) = leading_capitalized(&cleaned) {
        return Ok(name);
    }
    if !cleaned.is_empty() {
        return Ok(ellipsize(&cleaned, MAX_SUBJECT_CHARS));
    }
    Ok(UNKNOWN_MERCHANT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(subject: &str, sender: &str) -> String {
        resolve_merchant(subject, sender).unwrap()
    }

    #[test]
    fn test_display_name_wins() {
        assert_eq!(resolve("Big sale", "\"Uber Eats\" <promo@uber.com>"), "Uber Eats");
        assert_eq!(
            resolve("Big sale", "Southwest Airlines <deals@luv.southwest.com>"),
            "Southwest Airlines"
        );
    }

    #[test]
    fn test_no_reply_display_name_falls_through_to_domain() {
        assert_eq!(resolve("Hello", "\"No-Reply\" <noreply@nordstrom.com>"), "Nordstrom");
        assert_eq!(resolve("Hello", "do-not-reply <x@papa-johns.com>"), "Papa Johns");
    }

    #[test]
    fn test_domain_label() {
        assert_eq!(resolve("20% Off Sale", "deals@target.com"), "Target");
        assert_eq!(resolve("", "offers@email.best_buy.com"), "Best Buy");
        assert_eq!(resolve("", "news@mail.marksandspencer.co.uk"), "Marksandspencer");
    }

    #[test]
    fn test_generic_domain_uses_subject_attribution() {
        assert_eq!(resolve("A special gift from Blue Apron", "someone@gmail.com"), "Blue Apron");
        assert_eq!(resolve("New arrivals by Warby Parker", "x@yahoo.com"), "Warby Parker");
    }

    #[test]
    fn test_leading_separator() {
        assert_eq!(resolve("Papa John's - Buy One Get One Free", "a@gmail.com"), "Papa John's");
        assert_eq!(resolve("Sephora | Your beauty picks", "a@gmail.com"), "Sephora");
    }

    #[test]
    fn test_marketing_opener_is_not_a_merchant() {
        let name = resolve("Explore Fall Favorites - new arrivals", "a@gmail.com");
        assert_ne!(name, "Explore Fall Favorites");
        assert_eq!(name, "Fall Favorites");
    }

    #[test]
    fn test_cleaned_subject_leading_words() {
        assert_eq!(resolve("Hey Friend! Chewy has 30% off treats!!", "a@gmail.com"), "Chewy");
        assert_eq!(
            resolve("RE: Last Chance: Allbirds Runners restocked", "a@gmail.com"),
            "Allbirds Runners"
        );
        assert_eq!(resolve("Psst... $60 Casper savings inside", "a@gmail.com"), "Casper");
    }

    #[test]
    fn test_word_and_length_limits() {
        assert_eq!(resolve("Alpha Beta Gamma Delta deals", "a@gmail.com"), "Alpha Beta Gamma");
        assert_eq!(
            resolve("Supercalifragilistic Expialidocious Emporium", "a@gmail.com"),
            "Supercalifragilistic"
        );
    }

    #[test]
    fn test_subject_fallback_and_unknown() {
        assert_eq!(
            resolve("everything must go this weekend at our stores", "a@gmail.com"),
            "everything must go this weekend at our s..."
        );
        assert_eq!(resolve("", ""), UNKNOWN_MERCHANT);
        assert_eq!(resolve("!!! 50% off !!!", "not an address"), UNKNOWN_MERCHANT);
    }

    #[test]
    fn test_clean_subject() {
        assert_eq!(clean_subject("FWD: Don't miss out: 40% Off Flights!!").unwrap(), "Flights");
        assert_eq!(clean_subject("\u{1F389} Party Supplies \u{1F389}").unwrap(), "Party Supplies");
    }
}
