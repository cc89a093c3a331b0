use serde::{Deserialize, Serialize};

pub const NO_CODE: &str = "NO CODE NEEDED";
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";
pub const OTHER_CATEGORY: &str = "Other";
pub const DEFAULT_DISCOUNT: &str = "Check email for details";

/// One email as handed over by whatever fetched it.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEmail {
    #[serde(default, alias = "body_text", alias = "bodyText", alias = "text")]
    pub body: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default, alias = "from")]
    pub sender: String,
}

impl RawEmail {
    pub fn new(body: &str, subject: &str, sender: &str) -> Self {
        Self {
            body: body.to_string(),
            subject: subject.to_string(),
            sender: sender.to_string(),
        }
    }
}

/// Intermediate record built from a single email before categorization.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoDraft {
    pub code: String,
    pub discount: String,
    pub expiration: Option<String>,
    pub merchant: String,
    pub raw_snippet: String,
    pub subject: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Expired,
    Critical,
    High,
    Medium,
    Low,
    None,
}

impl Urgency {
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            None => Self::None,
            Some(d) if d < 0 => Self::Expired,
            Some(0..=1) => Self::Critical,
            Some(2..=3) => Self::High,
            Some(4..=7) => Self::Medium,
            Some(_) => Self::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expired => "expired",
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Final, categorized and enriched offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoRecord {
    pub code: String,
    pub discount: String,
    pub expiration: Option<String>,
    pub merchant: String,
    pub raw_snippet: String,
    pub subject: String,
    pub category: String,
    pub days_remaining: Option<i64>,
    pub urgency: Urgency,
}

impl PromoRecord {
    /// Attach a category to a draft. Urgency fields stay empty until the
    /// enricher runs.
    pub fn from_draft(draft: PromoDraft, category: String) -> Self {
        Self {
            code: draft.code,
            discount: draft.discount,
            expiration: draft.expiration,
            merchant: draft.merchant,
            raw_snippet: draft.raw_snippet,
            subject: draft.subject,
            category,
            days_remaining: None,
            urgency: Urgency::None,
        }
    }
}
