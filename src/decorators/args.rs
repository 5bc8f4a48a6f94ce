//! Argument lists and cache keys
//!
//! `Args` carries the arguments of a dynamically-shaped call; `CallRecord`
//! is its hashable form, used as the memoization key.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Number, Value};

use crate::error::{DecoratorError, Result};

// == Args ==
/// Positional and keyword arguments of one call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    /// Positional values, in call order
    pub positional: Vec<Value>,
    /// Keyword values, in the order they were supplied
    pub keyword: Vec<(String, Value)>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Appends a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.push((name.into(), value.into()));
        self
    }

    /// Positional argument at `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Keyword argument named `name`; the last one wins on duplicates.
    pub fn get_kw(&self, name: &str) -> Option<&Value> {
        self.keyword
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl fmt::Display for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        let mut first = true;
        for value in &self.positional {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        for (name, value) in &self.keyword {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        write!(f, ")")
    }
}

// == Key Value ==
/// Hashable scalar taken from an argument value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Bit pattern of the float, with -0.0 folded into 0.0
    Float(u64),
    Str(String),
}

impl KeyValue {
    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            KeyValue::Int(i)
        } else if let Some(u) = n.as_u64() {
            KeyValue::UInt(u)
        } else {
            let f = n.as_f64().unwrap_or(f64::NAN);
            let f = if f == 0.0 { 0.0 } else { f };
            KeyValue::Float(f.to_bits())
        }
    }

    fn try_from_value(value: &Value, position: &dyn fmt::Display) -> Result<Self> {
        match value {
            Value::Null => Ok(KeyValue::Null),
            Value::Bool(b) => Ok(KeyValue::Bool(*b)),
            Value::Number(n) => Ok(KeyValue::from_number(n)),
            Value::String(s) => Ok(KeyValue::Str(s.clone())),
            Value::Array(_) => Err(DecoratorError::CacheKey(format!(
                "unhashable list value for argument {position}"
            ))),
            Value::Object(_) => Err(DecoratorError::CacheKey(format!(
                "unhashable map value for argument {position}"
            ))),
        }
    }
}

// == Call Record ==
/// Hashable identity of one call: positional values in order plus the set
/// of keyword pairs (keyword order does not matter).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallRecord {
    positional: Vec<KeyValue>,
    keyword: BTreeMap<String, KeyValue>,
}

impl CallRecord {
    /// Builds the key for `args`.
    ///
    /// Fails with `CacheKey` if any value is a list or a map.
    pub fn from_args(args: &Args) -> Result<Self> {
        let positional = args
            .positional
            .iter()
            .enumerate()
            .map(|(i, v)| KeyValue::try_from_value(v, &i))
            .collect::<Result<Vec<_>>>()?;

        let mut keyword = BTreeMap::new();
        for (name, value) in &args.keyword {
            let key = KeyValue::try_from_value(value, &format_args!("'{name}'"))?;
            keyword.insert(name.clone(), key);
        }

        Ok(Self {
            positional,
            keyword,
        })
    }
}

impl TryFrom<&Args> for CallRecord {
    type Error = DecoratorError;

    fn try_from(args: &Args) -> Result<Self> {
        CallRecord::from_args(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_mixes_positional_and_keyword() {
        let args = Args::new().arg(1).arg("two").kwarg("verbose", true);
        assert_eq!(args.to_string(), r#"(1, "two", verbose=true)"#);
        assert_eq!(Args::new().to_string(), "()");
    }

    #[test]
    fn test_lookup() {
        let args = Args::new().arg(5).kwarg("mode", "fast").kwarg("mode", "slow");
        assert_eq!(args.get(0), Some(&json!(5)));
        assert_eq!(args.get(1), None);
        assert_eq!(args.get_kw("mode"), Some(&json!("slow")));
        assert_eq!(args.get_kw("missing"), None);
    }

    #[test]
    fn test_keyword_order_is_irrelevant() {
        let a = Args::new().arg(1).kwarg("x", 1).kwarg("y", 2);
        let b = Args::new().arg(1).kwarg("y", 2).kwarg("x", 1);
        assert_eq!(
            CallRecord::from_args(&a).unwrap(),
            CallRecord::from_args(&b).unwrap()
        );
    }

    #[test]
    fn test_positional_order_matters() {
        let a = Args::new().arg(1).arg(2);
        let b = Args::new().arg(2).arg(1);
        assert_ne!(
            CallRecord::from_args(&a).unwrap(),
            CallRecord::from_args(&b).unwrap()
        );
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let a = Args::new().arg(0.0);
        let b = Args::new().arg(-0.0);
        assert_eq!(
            CallRecord::from_args(&a).unwrap(),
            CallRecord::from_args(&b).unwrap()
        );
    }

    #[test]
    fn test_int_float_and_bool_are_distinct_keys() {
        let int = CallRecord::from_args(&Args::new().arg(1)).unwrap();
        let float = CallRecord::from_args(&Args::new().arg(1.0)).unwrap();
        let boolean = CallRecord::from_args(&Args::new().arg(true)).unwrap();

        assert_ne!(int, float);
        assert_ne!(int, boolean);
        assert_ne!(float, boolean);
    }

    #[test]
    fn test_unhashable_positional() {
        let args = Args::new().arg(1).arg(json!([1, 2]));
        let err = CallRecord::from_args(&args).unwrap_err();
        assert!(matches!(err, DecoratorError::CacheKey(_)));
        assert!(err.to_string().contains("argument 1"));
    }

    #[test]
    fn test_unhashable_keyword() {
        let args = Args::new().kwarg("opts", json!({"a": 1}));
        let err = CallRecord::try_from(&args).unwrap_err();
        assert!(err.to_string().contains("'opts'"));
    }
}
