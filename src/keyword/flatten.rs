//! Flattening keyword expression trees into Solr query strings.

use crate::keyword::expression::{Conjunction, KeywordExpr};

/// Characters with special meaning in the Solr query syntax.
const SPECIAL_CHARS: &[char] = &[
    '\\', '+', '-', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '/', '&', '|',
];

/// Backslash-escape Solr query special characters and whitespace in a term.
pub fn escape_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if SPECIAL_CHARS.contains(&ch) || ch.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Flatten a keyword expression tree into a single Solr query string.
///
/// Terms are escaped with [`escape_term`]. AND groups prefix each child with
/// `+`, OR groups do not; a negated group gets a leading `-`. A group whose
/// surviving children reduce to a single plain term returns that term
/// directly (negation still applied) instead of wrapping it in parentheses.
/// Empty terms and empty groups are skipped and never contribute `()`;
/// flattening a tree with no surviving terms yields the empty string.
///
/// # Examples
///
/// ```
/// use solrkit::keyword::{KeywordExpr, flatten};
///
/// let expr = KeywordExpr::or(vec![KeywordExpr::term("cat")]).negated();
/// assert_eq!(flatten(&expr), "-cat");
/// ```
pub fn flatten(expr: &KeywordExpr) -> String {
    match expr {
        KeywordExpr::Term(term) => {
            let term = term.trim();
            if term.is_empty() {
                String::new()
            } else {
                escape_term(term)
            }
        }
        KeywordExpr::Group {
            conjunction,
            negation,
            children,
        } => {
            let mut parts = Vec::with_capacity(children.len());
            let mut nested = false;
            for child in children {
                let flat = flatten(child);
                if flat.is_empty() {
                    continue;
                }
                nested |= child.is_group();
                parts.push(flat);
            }
            if parts.is_empty() {
                return String::new();
            }

            let sign = if *negation { "-" } else { "" };
            if parts.len() == 1 && !nested {
                // A lone term needs neither parentheses nor a `+` prefix.
                return format!("{sign}{}", parts[0]);
            }

            let joined = match conjunction {
                Conjunction::And => parts
                    .iter()
                    .map(|part| format!("+{part}"))
                    .collect::<Vec<_>>()
                    .join(" "),
                Conjunction::Or => parts.join(" "),
            };
            format!("{sign}({joined})")
        }
    }
}
