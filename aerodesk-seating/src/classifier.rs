use aerodesk_shared::Passenger;
use serde::{Deserialize, Serialize};

/// Age thresholds for escort rules and priority bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgePolicy {
    /// Passengers younger than this are minors.
    #[serde(default = "default_minor_below")]
    pub minor_below: i32,
    /// Passengers at least this old earn the senior bonus.
    #[serde(default = "default_senior_from")]
    pub senior_from: i32,
}

fn default_minor_below() -> i32 {
    18
}

fn default_senior_from() -> i32 {
    65
}

impl Default for AgePolicy {
    fn default() -> Self {
        Self {
            minor_below: default_minor_below(),
            senior_from: default_senior_from(),
        }
    }
}

impl AgePolicy {
    /// An unknown age is never a minor.
    pub fn is_minor_age(&self, age: Option<i32>) -> bool {
        matches!(age, Some(a) if a < self.minor_below)
    }

    pub fn is_senior_age(&self, age: Option<i32>) -> bool {
        matches!(age, Some(a) if a >= self.senior_from)
    }

    pub fn is_minor(&self, passenger: &Passenger) -> bool {
        self.is_minor_age(passenger.age)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(age: Option<i32>) -> Passenger {
        Passenger {
            passenger_id: 1,
            dni: "12345678".to_string(),
            name: "Ana".to_string(),
            age,
            country: "Chile".to_string(),
        }
    }

    #[test]
    fn test_minor_boundary() {
        let policy = AgePolicy::default();
        assert!(policy.is_minor(&passenger(Some(0))));
        assert!(policy.is_minor(&passenger(Some(17))));
        assert!(!policy.is_minor(&passenger(Some(18))));
        assert!(!policy.is_minor(&passenger(Some(40))));
    }

    #[test]
    fn test_unknown_age_is_adult() {
        let policy = AgePolicy::default();
        assert!(!policy.is_minor(&passenger(None)));
        assert!(!policy.is_senior_age(None));
    }

    #[test]
    fn test_senior_boundary() {
        let policy = AgePolicy::default();
        assert!(!policy.is_senior_age(Some(64)));
        assert!(policy.is_senior_age(Some(65)));
    }
}
