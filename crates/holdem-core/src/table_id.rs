use crate::EngineError;
use rand::Rng;
use std::fmt::Display;
use std::fmt::Formatter;

/// A table's public address: a 4-digit decimal string in `[1000, 9999]`
/// (§6.2). Leading zeros never appear because the range starts at 1000, so
/// the space is intentionally 9,000 ids, not 10,000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(u16);

impl TableId {
    pub const MIN: u16 = 1000;
    pub const MAX: u16 = 9999;

    /// Parse a caller-supplied table id, rejecting anything that is not
    /// exactly four ASCII digits in range.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::invalid_argument("table id must be exactly 4 digits"));
        }
        let n: u16 = s
            .parse()
            .map_err(|_| EngineError::invalid_argument("table id must be numeric"))?;
        if !(Self::MIN..=Self::MAX).contains(&n) {
            return Err(EngineError::invalid_argument("table id out of range"));
        }
        Ok(Self(n))
    }

    /// Draw a uniformly random candidate id; callers retry on collision
    /// (§4.10's bounded resource-exhausted retry loop).
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(Self::MIN..=Self::MAX))
    }
}

impl Display for TableId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for TableId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for TableId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TableId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_wrong_length() {
        assert!(TableId::parse("123").is_err());
        assert!(TableId::parse("12345").is_err());
    }

    #[test]
    fn rejects_non_digits() {
        assert!(TableId::parse("12a4").is_err());
    }

    #[test]
    fn accepts_boundary_values() {
        assert_eq!(TableId::parse("1000").unwrap().to_string(), "1000");
        assert_eq!(TableId::parse("9999").unwrap().to_string(), "9999");
    }

    #[test]
    fn random_is_always_in_range() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..1000 {
            let id = TableId::random(&mut rng);
            assert!(id.0 >= TableId::MIN && id.0 <= TableId::MAX);
        }
    }
}
