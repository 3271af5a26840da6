use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Signed process identifier as reported by `lsof`/`pgrep`.
///
/// The value `0` is reserved as a selector meaning "every process".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pid(i32);

impl Pid {
    /// Selector for all processes rather than a specific one.
    pub const ALL: Pid = Pid(0);

    pub fn from_raw(pid: i32) -> Self {
        Self(pid)
    }

    pub fn as_i32(&self) -> i32 {
        self.0
    }

    pub fn is_all(&self) -> bool {
        self.0 == 0
    }
}

impl From<i32> for Pid {
    fn from(pid: i32) -> Self {
        Self(pid)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pid {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_all() {
        assert!(Pid::ALL.is_all());
        assert!(Pid::from_raw(0).is_all());
        assert!(!Pid::from_raw(1234).is_all());
    }

    #[test]
    fn test_display_is_decimal() {
        assert_eq!(Pid::from_raw(42).to_string(), "42");
        assert_eq!(Pid::from_raw(-7).to_string(), "-7");
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert_eq!("300".parse::<Pid>().unwrap(), Pid::from_raw(300));
        assert!("bogus".parse::<Pid>().is_err());
        assert!("99999999999".parse::<Pid>().is_err());
    }

    #[test]
    fn test_serializes_transparently() {
        let json = serde_json::to_string(&vec![Pid::from_raw(1), Pid::from_raw(2)]).unwrap();
        assert_eq!(json, "[1,2]");
    }
}
