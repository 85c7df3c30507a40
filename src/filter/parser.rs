use super::error::FilterError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A single clause: key, operator and, for comparison operators, a value.
///
/// A comparison value is either a double-quoted string (`\"` allowed inside)
/// or an unquoted run of non-space characters. A clause ends at a space or at
/// the end of the expression.
static CLAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?P<key>[A-Za-z0-9_-]+)(?:(?P<flag>[+-])|(?P<op>!?[=~])(?P<value>"(?:\\"|[^"])+"|[^" ][^ ]*))(?: |$)"#,
    )
    .expect("valid filter clause regex")
});

/// Comparison performed by a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`: value must match exactly
    Equals,
    /// `!=`: value must not match exactly
    NotEquals,
    /// `~`: value must contain the filter value
    Contains,
    /// `!~`: value must not contain the filter value
    NotContains,
    /// `+`: key must be present
    Present,
    /// `-`: key must be absent
    Absent,
}

impl Operator {
    /// Textual form of the operator as written in a filter expression
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Contains => "~",
            Operator::NotContains => "!~",
            Operator::Present => "+",
            Operator::Absent => "-",
        }
    }

    /// Whether the operator compares against a value
    pub fn takes_value(&self) -> bool {
        !matches!(self, Operator::Present | Operator::Absent)
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Equals),
            "!=" => Ok(Operator::NotEquals),
            "~" => Ok(Operator::Contains),
            "!~" => Ok(Operator::NotContains),
            "+" => Ok(Operator::Present),
            "-" => Ok(Operator::Absent),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter condition (e.g. `level=error` or `retry-`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    /// Record key the predicate looks at
    pub key: String,
    /// The comparison to perform
    pub operator: Operator,
    /// Comparison value; empty for `+` and `-`
    pub value: String,
}

impl Predicate {
    /// Build a predicate, checking the key and the value against the operator.
    ///
    /// Values given to `+` and `-` are dropped.
    pub fn new(
        key: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Result<Self, FilterError> {
        let key = key.into();
        if !is_valid_key(&key) {
            return Err(FilterError::InvalidKey(key));
        }

        let value = if operator.takes_value() {
            let value = value.into();
            if value.is_empty() {
                return Err(FilterError::MissingValue(operator.to_string()));
            }
            // a quoted value ends at the first `"` without a backslash before it
            if needs_quotes(&value) && has_bare_quote(&value) {
                return Err(FilterError::UnrepresentableValue(value));
            }
            value
        } else {
            String::new()
        };

        Ok(Predicate {
            key,
            operator,
            value,
        })
    }

    /// Build a predicate from the textual operator, as typed by a user
    pub fn from_parts(key: &str, operator: &str, value: &str) -> Result<Self, FilterError> {
        Predicate::new(key, operator.parse()?, value)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.key, self.operator)?;
        if !self.operator.takes_value() {
            return Ok(());
        }
        if needs_quotes(&self.value) {
            write!(f, "\"{}\"", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

fn needs_quotes(value: &str) -> bool {
    value.contains(' ') || value.starts_with('"')
}

fn has_bare_quote(value: &str) -> bool {
    let mut prev = None;
    for c in value.chars() {
        if c == '"' && prev != Some('\\') {
            return true;
        }
        prev = Some(c);
    }
    false
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A complete filter expression: predicates combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    /// Predicates in the order they appeared in the expression
    pub predicates: Vec<Predicate>,
}

impl FilterExpression {
    /// Create a new empty filter expression, which matches every record
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
        }
    }

    /// Parse a filter expression from a string.
    ///
    /// Never fails: text that doesn't form a clause is skipped, and an
    /// expression without any clause yields an empty filter.
    pub fn parse(s: &str) -> Self {
        Self::parse_with_skipped(s).0
    }

    /// Parse a filter expression and also return the fragments that were
    /// skipped because they didn't form a clause
    pub fn parse_with_skipped(s: &str) -> (Self, Vec<String>) {
        let mut predicates = Vec::new();
        let mut skipped = Vec::new();
        let mut last_end = 0;

        for caps in CLAUSE_RE.captures_iter(s) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            push_skipped(&mut skipped, &s[last_end..whole.start()]);
            last_end = whole.end();

            let (Some(key), Some(op)) = (caps.name("key"), caps.name("flag").or(caps.name("op")))
            else {
                continue;
            };
            let Ok(operator) = op.as_str().parse::<Operator>() else {
                continue;
            };

            let value = match caps.name("value") {
                Some(value) => strip_quotes(value.as_str()),
                None => "",
            };

            predicates.push(Predicate {
                key: key.as_str().to_string(),
                operator,
                value: value.to_string(),
            });
        }
        push_skipped(&mut skipped, &s[last_end..]);

        (FilterExpression { predicates }, skipped)
    }

    /// Check if this expression is empty (no filters)
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Number of predicates in the expression
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Append every predicate of `other` to this expression
    pub fn and(mut self, other: FilterExpression) -> Self {
        self.predicates.extend(other.predicates);
        self
    }

    /// Get all predicates that look at a given key
    pub fn predicates_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Predicate> {
        self.predicates.iter().filter(move |p| p.key == key)
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

impl FromIterator<Predicate> for FilterExpression {
    fn from_iter<I: IntoIterator<Item = Predicate>>(iter: I) -> Self {
        FilterExpression {
            predicates: iter.into_iter().collect(),
        }
    }
}

/// Drop the surrounding quotes of a quoted value; escapes inside are kept
fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn push_skipped(skipped: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        skipped.push(fragment.to_string());
    }
}
