use crate::discount::extract_discounts;
use crate::error::Result;
use crate::expiration::extract_expiration;
use crate::fmt::truncate_chars;
use crate::merchant::resolve_merchant;
use crate::models::{PromoDraft, RawEmail, DEFAULT_DISCOUNT, NO_CODE};
use crate::scanner::scan_candidates;
use crate::validator::is_valid_code;

pub const RAW_SNIPPET_CHARS: usize = 300;
pub const SUBJECT_SNIPPET_CHARS: usize = 100;

/// Build the draft records for one email.
///
/// One draft per valid code; a single `NO CODE NEEDED` draft when the email
/// only advertises a discount; nothing otherwise. Any error here concerns
/// this email alone and callers treat it as "no drafts".
pub fn assemble(email: &RawEmail) -> Result<Vec<PromoDraft>> {
    if email.body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let codes: Vec<String> = scan_candidates(&email.body)?
        .into_iter()
        .filter(|c| is_valid_code(c))
        .collect();
    let discounts = extract_discounts(&email.body)?;

    if codes.is_empty() && discounts.is_empty() {
        return Ok(Vec::new());
    }

    let expiration = extract_expiration(&email.body)?;
    let merchant = resolve_merchant(&email.subject, &email.sender)?;
    let raw_snippet = truncate_chars(&email.body, RAW_SNIPPET_CHARS);
    let subject = truncate_chars(&email.subject, SUBJECT_SNIPPET_CHARS);

    let draft = |code: String, discount: String| PromoDraft {
        code,
        discount,
        expiration: expiration.clone(),
        merchant: merchant.clone(),
        raw_snippet: raw_snippet.clone(),
        subject: subject.clone(),
    };

    if codes.is_empty() {
        let discount = discounts.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
        return Ok(vec![draft(NO_CODE.to_string(), discount)]);
    }

    let discount = discounts
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_DISCOUNT.to_string());
    Ok(codes.into_iter().map(|code| draft(code, discount.clone())).collect())
}
