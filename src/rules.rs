use std::sync::OnceLock;

use regex::Regex;

use crate::error::{PromoError, Result};

/// Static description of one pattern in an ordered rule table. Lower
/// priority runs first.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    pub pattern: &'static str,
    pub priority: u8,
}

#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub priority: u8,
    pub regex: Regex,
}

pub type RuleTable = OnceLock<std::result::Result<Vec<Rule>, regex::Error>>;
pub type LazyRegex = OnceLock<std::result::Result<Regex, regex::Error>>;

fn compile(specs: &[RuleSpec]) -> std::result::Result<Vec<Rule>, regex::Error> {
    let mut rules = specs
        .iter()
        .map(|entry| {
            Ok(Rule {
                name: entry.name,
                priority: entry.priority,
                regex: Regex::new(entry.pattern)?,
            })
        })
        .collect::<std::result::Result<Vec<_>, regex::Error>>()?;
    rules.sort_by_key(|r| r.priority);
    Ok(rules)
}

/// Compile `specs` on first use and hand back the shared, priority-ordered
/// table. A pattern that fails to compile surfaces as an error on every call.
pub fn table(cell: &'static RuleTable, specs: &[RuleSpec]) -> Result<&'static [Rule]> {
    cell.get_or_init(|| compile(specs))
        .as_ref()
        .map(|rules| rules.as_slice())
        .map_err(|e| PromoError::Regex(e.clone()))
}

pub fn regex(cell: &'static LazyRegex, pattern: &str) -> Result<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern))
        .as_ref()
        .map_err(|e| PromoError::Regex(e.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPECS: &[RuleSpec] = &[
        RuleSpec {
            name: "second",
            pattern: r"b",
            priority: 2,
        },
        RuleSpec {
            name: "first",
            pattern: r"a",
            priority: 1,
        },
    ];

    #[test]
    fn test_table_orders_by_priority() {
        static TABLE: RuleTable = OnceLock::new();
        let rules = table(&TABLE, SPECS).unwrap();
        let names: Vec<_> = rules.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_bad_pattern_is_an_error_not_a_panic() {
        static TABLE: RuleTable = OnceLock::new();
        let bad = &[RuleSpec {
            name: "bad",
            pattern: r"(unclosed",
            priority: 0,
        }];
        assert!(matches!(table(&TABLE, bad), Err(PromoError::Regex(_))));
        assert!(table(&TABLE, bad).is_err());
    }

    #[test]
    fn test_lazy_regex() {
        static RE: LazyRegex = OnceLock::new();
        let re = regex(&RE, r"\d+").unwrap();
        assert!(re.is_match("abc 42"));
    }
}
