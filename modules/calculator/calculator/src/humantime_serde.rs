//! Serde adapter for `Duration` fields written as humantime strings
//! (`"5s"`, `"1m 30s"`, `"250ms"`).
//!
//! ```ignore
//! #[derive(Serialize, Deserialize)]
//! struct Timeouts {
//!     #[serde(with = "crate::humantime_serde")]
//!     read_header: Duration,
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserializer, Serializer, de};

/// # Errors
/// Fails when the value is not a string `humantime` can parse.
pub fn deserialize<'de, D>(d: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct V;

    impl de::Visitor<'_> for V {
        type Value = Duration;

        fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt.write_str("a duration such as \"5s\" or \"250ms\"")
        }

        fn visit_str<E>(self, v: &str) -> Result<Duration, E>
        where
            E: de::Error,
        {
            humantime::parse_duration(v)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }

    d.deserialize_str(V)
}

/// # Errors
/// Propagates serializer failures.
#[allow(clippy::trivially_copy_pass_by_ref)]
pub fn serialize<S>(d: &Duration, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.collect_str(&humantime::format_duration(*d))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize, Deserialize)]
    struct Foo {
        #[serde(with = "super")]
        time: Duration,
    }

    #[test]
    fn parses_and_formats() {
        let foo: Foo = serde_json::from_str(r#"{"time": "10m 10s"}"#).unwrap();
        assert_eq!(foo.time, Duration::new(610, 0));
        assert_eq!(serde_json::to_string(&foo).unwrap(), r#"{"time":"10m 10s"}"#);
    }

    #[test]
    fn rejects_bare_numbers() {
        assert!(serde_json::from_str::<Foo>(r#"{"time": "10"}"#).is_err());
        assert!(serde_json::from_str::<Foo>(r#"{"time": 10}"#).is_err());
    }
}
