//! Attribute filtering as a structured predicate tree.
//!
//! Clauses name a dotted path into the record's JSON shape
//! (`noteType.code`, `results.score`) and a comparison. A filter is the
//! conjunction of its clauses; traversal through an array is any-match.
//! A missing field never matches.
//!
//! Operand coercion, in order: both sides numeric (numbers or numeric
//! strings) compare as numbers; both sides timestamps compare as instants;
//! otherwise string comparison. Ordering comparisons across incompatible
//! shapes are false.

use crate::records::parse_instant;
use serde_json::Value;

/// Comparison operators supported in filter clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

#[derive(Debug, Clone)]
struct Clause {
    path: String,
    op: CmpOp,
    operand: Operand,
}

#[derive(Debug, Clone)]
enum Operand {
    One(Value),
    Many(Vec<Value>),
}

/// A conjunction of comparison clauses over record attributes.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<Clause>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, path: impl Into<String>, op: CmpOp, operand: Operand) -> Self {
        self.clauses.push(Clause {
            path: path.into(),
            op,
            operand,
        });
        self
    }

    pub fn eq(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Eq, Operand::One(value.into()))
    }

    pub fn ne(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Ne, Operand::One(value.into()))
    }

    pub fn gt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Gt, Operand::One(value.into()))
    }

    pub fn gte(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Gte, Operand::One(value.into()))
    }

    pub fn lt(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Lt, Operand::One(value.into()))
    }

    pub fn lte(self, path: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(path, CmpOp::Lte, Operand::One(value.into()))
    }

    pub fn is_in<I, V>(self, path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push(
            path,
            CmpOp::In,
            Operand::Many(values.into_iter().map(Into::into).collect()),
        )
    }

    /// True when the record (as JSON) satisfies every clause.
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses.iter().all(|clause| clause.matches(record))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl Clause {
    fn matches(&self, record: &Value) -> bool {
        let mut found = Vec::new();
        resolve(record, &self.path, &mut found);
        match &self.operand {
            Operand::One(operand) => found
                .iter()
                .any(|actual| compare(actual, self.op, operand)),
            Operand::Many(operands) => found
                .iter()
                .any(|actual| operands.iter().any(|v| compare(actual, CmpOp::Eq, v))),
        }
    }
}

/// Collect every value reachable by the dotted path, fanning out over
/// arrays.
fn resolve<'a>(value: &'a Value, path: &str, out: &mut Vec<&'a Value>) {
    match path.split_once('.') {
        None => collect_leaf(value, path, out),
        Some((head, rest)) => match value {
            Value::Object(map) => {
                if let Some(next) = map.get(head) {
                    resolve_into(next, rest, out);
                }
            }
            Value::Array(items) => {
                for item in items {
                    resolve(item, path, out);
                }
            }
            _ => {}
        },
    }
}

fn resolve_into<'a>(value: &'a Value, rest: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                resolve(item, rest, out);
            }
        }
        other => resolve(other, rest, out),
    }
}

fn collect_leaf<'a>(value: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) => {
            if let Some(leaf) = map.get(key) {
                match leaf {
                    Value::Array(items) => out.extend(items.iter()),
                    other => out.push(other),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_leaf(item, key, out);
            }
        }
        _ => {}
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn compare(actual: &Value, op: CmpOp, operand: &Value) -> bool {
    if let (Some(a), Some(b)) = (as_number(actual), as_number(operand)) {
        return match op {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Gt => a > b,
            CmpOp::Gte => a >= b,
            CmpOp::Lt => a < b,
            CmpOp::Lte => a <= b,
            CmpOp::In => a == b,
        };
    }
    if let (Value::String(a), Value::String(b)) = (actual, operand)
        && let (Some(a), Some(b)) = (parse_instant(a), parse_instant(b))
    {
        return match op {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Gt => a > b,
            CmpOp::Gte => a >= b,
            CmpOp::Lt => a < b,
            CmpOp::Lte => a <= b,
            CmpOp::In => a == b,
        };
    }
    match op {
        CmpOp::Eq | CmpOp::In => actual == operand,
        CmpOp::Ne => actual != operand,
        CmpOp::Gt | CmpOp::Gte | CmpOp::Lt | CmpOp::Lte => match (actual, operand) {
            (Value::String(a), Value::String(b)) => match op {
                CmpOp::Gt => a > b,
                CmpOp::Gte => a >= b,
                CmpOp::Lt => a < b,
                _ => a <= b,
            },
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_on_top_level_field() {
        let record = json!({"status": "active"});
        assert!(Filter::new().eq("status", "active").matches(&record));
        assert!(!Filter::new().eq("status", "resolved").matches(&record));
    }

    #[test]
    fn test_dotted_path_traverses_nested() {
        let record = json!({"noteType": {"code": "308335008"}});
        assert!(Filter::new().eq("noteType.code", "308335008").matches(&record));
    }

    #[test]
    fn test_array_traversal_is_any_match() {
        let record = json!({"results": [{"score": 3}, {"score": 12}]});
        assert!(Filter::new().gte("results.score", 10).matches(&record));
        assert!(!Filter::new().gte("results.score", 13).matches(&record));
    }

    #[test]
    fn test_missing_field_never_matches() {
        let record = json!({"id": "x"});
        assert!(!Filter::new().eq("status", "active").matches(&record));
        // Ne over a missing field is still a non-match.
        assert!(!Filter::new().ne("status", "active").matches(&record));
    }

    #[test]
    fn test_numeric_strings_compare_numerically() {
        let record = json!({"value": "9.4"});
        assert!(Filter::new().gte("value", 9).matches(&record));
        assert!(Filter::new().lt("value", "10").matches(&record));
        assert!(!Filter::new().gt("value", "9.4").matches(&record));
    }

    #[test]
    fn test_timestamps_compare_as_instants() {
        let record = json!({"startTime": "2023-06-01T09:00:00Z"});
        assert!(Filter::new().gt("startTime", "2023-05-31").matches(&record));
        assert!(
            Filter::new()
                .lte("startTime", "2023-06-01T09:00:00+00:00")
                .matches(&record)
        );
    }

    #[test]
    fn test_is_in() {
        let record = json!({"status": "OPEN"});
        assert!(Filter::new().is_in("status", ["OPEN", "COMPLETED"]).matches(&record));
        assert!(!Filter::new().is_in("status", ["CLOSED"]).matches(&record));
    }

    #[test]
    fn test_conjunction() {
        let record = json!({"status": "active", "value": 5});
        let filter = Filter::new().eq("status", "active").gt("value", 3);
        assert!(filter.matches(&record));
        let filter = Filter::new().eq("status", "active").gt("value", 7);
        assert!(!filter.matches(&record));
    }

    #[test]
    fn test_incomparable_ordering_is_false() {
        let record = json!({"status": true});
        assert!(!Filter::new().gt("status", 1).matches(&record));
    }
}
