use serde_json::Value;

/// Integer value of a JSON number, accepting floats with no fractional part.
/// Other numbers such as `1.5` give `None`, so they never count toward a score.
pub fn as_integer(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| {
        v.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, bolero::generator::TypeGenerator)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    pub fn value(self) -> i64 {
        match self {
            Vote::Up => 1,
            Vote::Down => -1,
        }
    }

    pub fn from_value(v: i64) -> Option<Vote> {
        match v {
            1 => Some(Vote::Up),
            -1 => Some(Vote::Down),
            _ => None,
        }
    }

    /// Reads a raw vote slot. Anything but an integer ±1 is "no vote".
    pub fn from_json(v: &Value) -> Option<Vote> {
        as_integer(v).and_then(Vote::from_value)
    }

    pub fn to_json(self) -> Value {
        Value::from(self.value())
    }

    /// Next value of a vote slot when `cast` is clicked: casting the vote
    /// already there removes it, anything else replaces it.
    pub fn toggle(current: Option<Vote>, cast: Vote) -> Option<Vote> {
        match current {
            Some(current) if current == cast => None,
            _ => Some(cast),
        }
    }
}
