use std::ops::Deref;

use serde::Deserialize;

/// A duration written as space separated `<n>s`, `<n>m`, `<n>h` or `<n>d`
/// parts, e.g. `"1m 30s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl Deref for Duration {
    type Target = std::time::Duration;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("Invalid duration"))
    }
}

fn parse(s: &str) -> Option<std::time::Duration> {
    s.split_whitespace()
        .try_fold(std::time::Duration::default(), |out, part| {
            let (digits, unit) = part.split_at(part.find(|c: char| !c.is_ascii_digit())?);
            let value = digits.parse::<u64>().ok()?;
            let factor = match unit {
                "s" => 1,
                "m" => 60,
                "h" => 60 * 60,
                "d" => 24 * 60 * 60,
                _ => return None,
            };
            out.checked_add(std::time::Duration::from_secs(value.checked_mul(factor)?))
        })
}
