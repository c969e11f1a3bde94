//! The boolean keyword expression tree.

use serde::{Deserialize, Serialize};

/// How the children of a keyword group are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Conjunction {
    /// Every child must match.
    And,
    /// At least one child must match.
    Or,
}

/// A node in a keyword expression tree: either a bare term or a group of
/// child expressions combined with a conjunction and optional negation.
///
/// The serde shape follows the conventional boolean-keyword-tree layout used
/// by search frameworks: a bare string for a term, an object with
/// `conjunction`, `negation` and `children` keys for a group.
///
/// # Examples
///
/// ```
/// use solrkit::keyword::{Conjunction, KeywordExpr, flatten};
///
/// let expr = KeywordExpr::and(vec![
///     KeywordExpr::term("cat"),
///     KeywordExpr::term("dog"),
/// ]);
/// assert_eq!(flatten(&expr), "(+cat +dog)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeywordExpr {
    /// A single keyword.
    Term(String),
    /// A group of child expressions.
    Group {
        /// How the children combine.
        conjunction: Conjunction,
        /// Whether the whole group is negated.
        #[serde(default)]
        negation: bool,
        /// The child expressions, in order.
        #[serde(default)]
        children: Vec<KeywordExpr>,
    },
}

impl KeywordExpr {
    /// Create a term node.
    pub fn term<S: Into<String>>(term: S) -> Self {
        KeywordExpr::Term(term.into())
    }

    /// Create an AND group.
    pub fn and(children: Vec<KeywordExpr>) -> Self {
        KeywordExpr::Group {
            conjunction: Conjunction::And,
            negation: false,
            children,
        }
    }

    /// Create an OR group.
    pub fn or(children: Vec<KeywordExpr>) -> Self {
        KeywordExpr::Group {
            conjunction: Conjunction::Or,
            negation: false,
            children,
        }
    }

    /// Negate this expression.
    ///
    /// A term is wrapped in a negated single-child OR group; a group gets its
    /// negation flag set.
    pub fn negated(self) -> Self {
        match self {
            KeywordExpr::Term(_) => KeywordExpr::Group {
                conjunction: Conjunction::Or,
                negation: true,
                children: vec![self],
            },
            KeywordExpr::Group {
                conjunction,
                children,
                ..
            } => KeywordExpr::Group {
                conjunction,
                negation: true,
                children,
            },
        }
    }

    /// Check whether this node is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, KeywordExpr::Group { .. })
    }
}
