//! Filter expression parsing and matching
//!
//! A filter expression is a space-separated list of clauses. Every clause
//! names a key of the logfmt record, an operator and, for comparison
//! operators, a value. All clauses must match for a record to pass.
//!
//! # Syntax
//!
//! ```text
//! key=value            Key is present and its value equals `value`
//! key!=value           Key is present and its value differs from `value`
//! key~value            Key is present and its value contains `value`
//! key!~value           Key is present and its value does not contain `value`
//! key+                 Key is present, whatever its value
//! key-                 Key is absent
//! ```
//!
//! Values containing spaces can be double-quoted: `msg="connection reset"`.
//! A double quote inside a quoted value is written as `\"`; the backslash is
//! kept in the stored value.
//!
//! Fragments that don't form a clause are skipped, so a malformed expression
//! degrades to fewer predicates instead of failing.
//!
//! # Examples
//!
//! ```text
//! level=error                             # Error records only
//! level!=debug component~http             # Non-debug records from http components
//! err+ retry-                             # Records with an error and no retry field
//! msg~"connection reset"                  # Quoted value with a space
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::FilterError;
pub use matcher::FieldLookup;
pub use parser::{FilterExpression, Operator, Predicate};
