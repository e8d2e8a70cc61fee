//! Captured path parameters and typed access to them.

use crate::error::ParamError;
use chrono::{NaiveDate, NaiveDateTime};

/// A single captured parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    key: String,
    value: String,
}

impl Param {
    /// The parameter name from the pattern.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The captured value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The parameters captured during a single lookup.
///
/// Entries appear in the order the `{name}`/`*name` tokens appear in the
/// matched pattern, left to right. Beyond plain [`get`](Params::get) access,
/// typed accessors parse a value into a concrete type, reporting an absent
/// key or the underlying parse failure as a [`ParamError`]; each has a
/// `get_*` companion that discards the error in favor of the type's zero
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    items: Vec<Param>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty parameter set with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build a parameter set from key-value pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut out = Self::new();
        for (key, value) in pairs {
            out.push(key, value);
        }
        out
    }

    pub(crate) fn push(&mut self, key: &str, value: &str) {
        self.items.push(Param {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of captured parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no parameters were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over (name, value) pairs in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|p| (p.key.as_str(), p.value.as_str()))
    }

    /// Get the value captured for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    fn require(&self, key: &str) -> Result<&str, ParamError> {
        self.get(key).ok_or_else(|| ParamError::NotFound(key.into()))
    }

    /// The value for `key`, or a not-found error.
    pub fn string(&self, key: &str) -> Result<&str, ParamError> {
        self.require(key)
    }

    /// Convenience wrapper around [`string`](Params::string) that swallows
    /// the error.
    #[must_use]
    pub fn get_string(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// The value for `key` parsed as a bool.
    ///
    /// Accepts `1`, `t`, `T`, `TRUE`, `true`, `True` and their false
    /// counterparts.
    pub fn bool(&self, key: &str) -> Result<bool, ParamError> {
        match self.require(key)? {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            other => Err(ParamError::ParseBool {
                key: key.into(),
                // Anything reaching here fails the strict parse too.
                source: other.parse::<bool>().unwrap_err(),
            }),
        }
    }

    /// Convenience wrapper around [`bool`](Params::bool) that swallows the
    /// error.
    #[must_use]
    pub fn get_bool(&self, key: &str) -> bool {
        self.bool(key).unwrap_or_default()
    }

    /// The value for `key` parsed as a machine-word signed integer.
    pub fn int(&self, key: &str) -> Result<isize, ParamError> {
        let v = self.require(key)?;
        v.parse().map_err(|source| ParamError::ParseInt {
            key: key.into(),
            source,
        })
    }

    /// Convenience wrapper around [`int`](Params::int) that swallows the
    /// error.
    #[must_use]
    pub fn get_int(&self, key: &str) -> isize {
        self.int(key).unwrap_or_default()
    }

    /// The value for `key` parsed as an `i64`.
    pub fn int64(&self, key: &str) -> Result<i64, ParamError> {
        let v = self.require(key)?;
        v.parse().map_err(|source| ParamError::ParseInt {
            key: key.into(),
            source,
        })
    }

    /// Convenience wrapper around [`int64`](Params::int64) that swallows the
    /// error.
    #[must_use]
    pub fn get_int64(&self, key: &str) -> i64 {
        self.int64(key).unwrap_or_default()
    }

    /// The value for `key` parsed as a machine-word unsigned integer.
    pub fn uint(&self, key: &str) -> Result<usize, ParamError> {
        let v = self.require(key)?;
        v.parse().map_err(|source| ParamError::ParseInt {
            key: key.into(),
            source,
        })
    }

    /// Convenience wrapper around [`uint`](Params::uint) that swallows the
    /// error.
    #[must_use]
    pub fn get_uint(&self, key: &str) -> usize {
        self.uint(key).unwrap_or_default()
    }

    /// The value for `key` parsed as a `u64`.
    pub fn uint64(&self, key: &str) -> Result<u64, ParamError> {
        let v = self.require(key)?;
        v.parse().map_err(|source| ParamError::ParseInt {
            key: key.into(),
            source,
        })
    }

    /// Convenience wrapper around [`uint64`](Params::uint64) that swallows
    /// the error.
    #[must_use]
    pub fn get_uint64(&self, key: &str) -> u64 {
        self.uint64(key).unwrap_or_default()
    }

    /// The value for `key` parsed as an `f64`.
    pub fn float(&self, key: &str) -> Result<f64, ParamError> {
        let v = self.require(key)?;
        v.parse().map_err(|source| ParamError::ParseFloat {
            key: key.into(),
            source,
        })
    }

    /// Convenience wrapper around [`float`](Params::float) that swallows the
    /// error.
    #[must_use]
    pub fn get_float(&self, key: &str) -> f64 {
        self.float(key).unwrap_or_default()
    }

    /// The value for `key` parsed as a date-time using a strftime format
    /// string.
    ///
    /// Date-only formats are accepted and yield midnight of that date.
    pub fn time(&self, key: &str, fmt: &str) -> Result<NaiveDateTime, ParamError> {
        let v = self.require(key)?;
        match NaiveDateTime::parse_from_str(v, fmt) {
            Ok(dt) => Ok(dt),
            Err(datetime_err) => match NaiveDate::parse_from_str(v, fmt) {
                Ok(date) => Ok(date.and_hms_opt(0, 0, 0).unwrap_or_default()),
                Err(_) => Err(ParamError::ParseTime {
                    key: key.into(),
                    source: datetime_err,
                }),
            },
        }
    }

    /// Convenience wrapper around [`time`](Params::time) that swallows the
    /// error.
    #[must_use]
    pub fn get_time(&self, key: &str, fmt: &str) -> NaiveDateTime {
        self.time(key, fmt).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Param>, fn(&'a Param) -> (&'a str, &'a str)>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter().map(|p| (p.key.as_str(), p.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "key";

    fn single(value: &str) -> Params {
        Params::from_pairs([(KEY, value)])
    }

    #[test]
    fn get_returns_captured_value() {
        let ps = Params::from_pairs([("a", "1"), ("b", "2")]);
        assert_eq!(ps.get("a"), Some("1"));
        assert_eq!(ps.get("b"), Some("2"));
        assert_eq!(ps.get("c"), None);
        assert_eq!(ps.len(), 2);
    }

    #[test]
    fn iteration_preserves_capture_order() {
        let ps = Params::from_pairs([("b", "2"), ("a", "1")]);
        let order: Vec<_> = ps.iter().collect();
        assert_eq!(order, vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn bool_accepts_all_literal_forms() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(single(v).bool(KEY).unwrap(), true, "value {v:?}");
        }
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(single(v).bool(KEY).unwrap(), false, "value {v:?}");
        }
    }

    #[test]
    fn bool_rejects_other_forms() {
        for v in ["TruE", "", "123"] {
            let err = single(v).bool(KEY).unwrap_err();
            assert!(matches!(err, ParamError::ParseBool { .. }), "value {v:?}");
        }
        assert!(Params::new().bool(KEY).unwrap_err().is_not_found());
        assert!(!single("TruE").get_bool(KEY));
    }

    #[test]
    fn string_requires_presence() {
        assert_eq!(single("").string(KEY).unwrap(), "");
        assert_eq!(single("  ").string(KEY).unwrap(), "  ");
        assert_eq!(single("foobar").string(KEY).unwrap(), "foobar");
        let ps = Params::from_pairs([("KEY", "foobar")]);
        assert!(ps.string(KEY).unwrap_err().is_not_found());
        assert_eq!(ps.get_string(KEY), "");
    }

    #[test]
    fn int64_parses_full_range() {
        assert_eq!(single("0").int64(KEY).unwrap(), 0);
        assert_eq!(single("-12345").int64(KEY).unwrap(), -12345);
        assert_eq!(
            single("9223372036854775807").int64(KEY).unwrap(),
            i64::MAX
        );
        assert_eq!(
            single("-9223372036854775808").int64(KEY).unwrap(),
            i64::MIN
        );
    }

    #[test]
    fn int64_reports_range_and_syntax_failures() {
        use std::num::IntErrorKind;

        let err = single("9223372036854775808").int64(KEY).unwrap_err();
        match err {
            ParamError::ParseInt { key, source } => {
                assert_eq!(key, KEY);
                assert_eq!(*source.kind(), IntErrorKind::PosOverflow);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = single("twenty two").int64(KEY).unwrap_err();
        match err {
            ParamError::ParseInt { source, .. } => {
                assert_eq!(*source.kind(), IntErrorKind::InvalidDigit);
            }
            other => panic!("unexpected error {other:?}"),
        }

        assert_eq!(single("22.89").get_int64(KEY), 0);
        assert!(Params::new().int64(KEY).unwrap_err().is_not_found());
    }

    #[test]
    fn uint64_rejects_negatives() {
        assert_eq!(
            single("18446744073709551615").uint64(KEY).unwrap(),
            u64::MAX
        );
        assert!(matches!(
            single("-1").uint64(KEY).unwrap_err(),
            ParamError::ParseInt { .. }
        ));
        assert_eq!(single("-1").get_uint64(KEY), 0);
    }

    #[test]
    fn machine_word_variants_match_64_bit_ones() {
        assert_eq!(single("356487").uint(KEY).unwrap(), 356487);
        assert_eq!(single("-12345").int(KEY).unwrap(), -12345);
        assert_eq!(single("7").get_int(KEY), 7);
        assert!(Params::new().uint(KEY).unwrap_err().is_not_found());
    }

    #[test]
    fn float_parses_and_reports_syntax() {
        assert_eq!(single("1.0").float(KEY).unwrap(), 1.0);
        assert_eq!(single("0.000000009").float(KEY).unwrap(), 0.000000009);
        assert_eq!(single("-1234.456e+78").float(KEY).unwrap(), -1234.456e+78);
        assert!(matches!(
            single("zero.one").float(KEY).unwrap_err(),
            ParamError::ParseFloat { .. }
        ));
        assert!(matches!(
            single("0.1.2").float(KEY).unwrap_err(),
            ParamError::ParseFloat { .. }
        ));
        assert_eq!(single("bad").get_float(KEY), 0.0);
    }

    #[test]
    fn time_parses_dates_and_datetimes() {
        let want = NaiveDate::from_ymd_opt(1943, 9, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(single("1943-09-21").time(KEY, "%Y-%m-%d").unwrap(), want);

        let want = NaiveDate::from_ymd_opt(1929, 4, 8)
            .unwrap()
            .and_hms_opt(12, 24, 59)
            .unwrap();
        assert_eq!(
            single("1929+04+08+12:24:59")
                .time(KEY, "%Y+%m+%d+%H:%M:%S")
                .unwrap(),
            want
        );
    }

    #[test]
    fn time_reports_absent_keys_and_bad_values() {
        assert!(Params::new().time(KEY, "%Y-%m-%d").unwrap_err().is_not_found());
        assert!(matches!(
            single("foo bar").time(KEY, "%Y-%m-%d").unwrap_err(),
            ParamError::ParseTime { .. }
        ));
        assert!(matches!(
            single("08/15/1953").time(KEY, "%Y-%m-%d").unwrap_err(),
            ParamError::ParseTime { .. }
        ));
        assert_eq!(
            single("junk").get_time(KEY, "%Y-%m-%d"),
            NaiveDateTime::default()
        );
    }
}
