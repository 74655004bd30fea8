//! CODEOWNERS parsing and matching
//!
//! Only the subset the audit needs: comment and blank line skipping, a
//! leading-`*` catch-all, and plain substring matching against the
//! root-relative path. Owners accumulate from every matching rule in source
//! order, duplicates included. Full CODEOWNERS glob syntax is out of scope.

/// One parsed rule: a path pattern and the owners listed after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipRule {
    pub pattern: String,
    pub owners: Vec<String>,
}

/// Parse raw manifest text, preserving rule order.
///
/// Any line containing `#` is skipped entirely, as are blank lines. Rule
/// order matters to callers because later rules may be meant to override
/// earlier ones.
pub fn parse_manifest(text: &str) -> Vec<OwnershipRule> {
    let mut rules = Vec::new();

    for line in text.lines() {
        if line.contains('#') || line.trim().is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(pattern) = tokens.next() else {
            continue;
        };

        rules.push(OwnershipRule {
            pattern: pattern.to_string(),
            owners: tokens.map(str::to_string).collect(),
        });
    }

    rules
}

/// True when the text cannot be a manifest, e.g. a JSON error payload that a
/// failed fetch wrote into the cache
pub fn looks_like_manifest(text: &str) -> bool {
    !text.contains('{')
}

/// Collect owners for `path` from every matching rule.
///
/// The query path gets a leading `/` so root-relative patterns match. A rule
/// whose pattern starts with `*` is a catch-all and applies regardless of
/// its position; any other pattern matches when it is a substring of the
/// normalized path. No deduplication.
pub fn match_owners(rules: &[OwnershipRule], path: &str) -> Vec<String> {
    let normalized = format!("/{path}");
    let mut owners = Vec::new();

    for rule in rules {
        if rule.pattern.starts_with('*') || normalized.contains(&rule.pattern) {
            owners.extend(rule.owners.iter().cloned());
        }
    }

    owners
}
