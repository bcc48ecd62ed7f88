use aerodesk_core::{CoreError, CoreResult};
use aerodesk_shared::{Airplane, Flight};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Hardcoded flight-id to model mapping kept from the first fleet rollout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegacyAirplaneRule {
    pub flight_ids: Vec<i64>,
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Use the flight's stored airplane reference before any id heuristic.
    #[serde(default = "default_prefer_stored")]
    pub prefer_stored_reference: bool,
    #[serde(default = "default_legacy_rules")]
    pub legacy_rules: Vec<LegacyAirplaneRule>,
}

fn default_prefer_stored() -> bool {
    true
}

fn default_legacy_rules() -> Vec<LegacyAirplaneRule> {
    vec![
        LegacyAirplaneRule {
            flight_ids: vec![1, 3],
            model: "AirNova-660".to_string(),
        },
        LegacyAirplaneRule {
            flight_ids: vec![2, 4],
            model: "AirMax-720neo".to_string(),
        },
    ]
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            prefer_stored_reference: default_prefer_stored(),
            legacy_rules: default_legacy_rules(),
        }
    }
}

/// Which rule picked the airplane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionSource {
    StoredReference,
    LegacyFlightRule,
    ModuloFallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAirplane {
    pub airplane: Airplane,
    pub source: ResolutionSource,
}

pub struct AirplaneResolver {
    config: ResolverConfig,
}

impl AirplaneResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Pick the airplane whose seat map serves `flight`.
    ///
    /// Order: stored reference (when enabled), legacy flight-id rule, then
    /// `airplanes[(flight_id - 1) mod n]` over airplanes sorted by id.
    pub fn resolve(&self, flight: &Flight, airplanes: &[Airplane]) -> CoreResult<ResolvedAirplane> {
        let mut fleet: Vec<&Airplane> = airplanes.iter().collect();
        fleet.sort_by_key(|a| a.airplane_id);

        if fleet.is_empty() {
            return Err(CoreError::AirplaneNotFound(flight.flight_id));
        }

        let legacy = self.legacy_match(flight.flight_id, &fleet);

        if self.config.prefer_stored_reference {
            if let Some(stored_id) = flight.airplane_id {
                match fleet.iter().find(|a| a.airplane_id == stored_id) {
                    Some(stored) => {
                        if let Some(legacy) = legacy.filter(|l| l.airplane_id != stored_id) {
                            warn!(
                                flight_id = flight.flight_id,
                                stored = stored.airplane_id,
                                legacy = legacy.airplane_id,
                                "Stored airplane reference disagrees with legacy flight rule, \
                                 using stored reference"
                            );
                        }
                        return Ok(ResolvedAirplane {
                            airplane: (*stored).clone(),
                            source: ResolutionSource::StoredReference,
                        });
                    }
                    None => warn!(
                        flight_id = flight.flight_id,
                        airplane_id = stored_id,
                        "Flight references an unknown airplane"
                    ),
                }
            }
        }

        if let Some(airplane) = legacy {
            warn!(
                flight_id = flight.flight_id,
                airplane_id = airplane.airplane_id,
                "Airplane chosen by legacy flight-id rule"
            );
            return Ok(ResolvedAirplane {
                airplane: airplane.clone(),
                source: ResolutionSource::LegacyFlightRule,
            });
        }

        let index = (flight.flight_id - 1).rem_euclid(fleet.len() as i64) as usize;
        let airplane = fleet[index];
        warn!(
            flight_id = flight.flight_id,
            airplane_id = airplane.airplane_id,
            "Airplane chosen by modulo fallback"
        );
        Ok(ResolvedAirplane {
            airplane: airplane.clone(),
            source: ResolutionSource::ModuloFallback,
        })
    }

    fn legacy_match<'a>(&self, flight_id: i64, fleet: &[&'a Airplane]) -> Option<&'a Airplane> {
        let rule = self
            .config
            .legacy_rules
            .iter()
            .find(|rule| rule.flight_ids.contains(&flight_id))?;
        fleet
            .iter()
            .find(|a| a.name.contains(&rule.model))
            .copied()
    }
}

impl Default for AirplaneResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::flight;

    fn fleet() -> Vec<Airplane> {
        vec![
            Airplane { airplane_id: 2, name: "AirMax-720neo".to_string() },
            Airplane { airplane_id: 1, name: "AirNova-660".to_string() },
            Airplane { airplane_id: 3, name: "Regional 190".to_string() },
        ]
    }

    #[test]
    fn test_stored_reference_wins() {
        let resolver = AirplaneResolver::default();
        let resolved = resolver.resolve(&flight(1, Some(2)), &fleet()).unwrap();
        assert_eq!(resolved.airplane.airplane_id, 2);
        assert_eq!(resolved.source, ResolutionSource::StoredReference);
    }

    #[test]
    fn test_legacy_rule_without_reference() {
        let resolver = AirplaneResolver::default();

        let odd = resolver.resolve(&flight(3, None), &fleet()).unwrap();
        assert_eq!(odd.airplane.name, "AirNova-660");
        assert_eq!(odd.source, ResolutionSource::LegacyFlightRule);

        let even = resolver.resolve(&flight(4, None), &fleet()).unwrap();
        assert_eq!(even.airplane.name, "AirMax-720neo");
    }

    #[test]
    fn test_dangling_reference_falls_through() {
        let resolver = AirplaneResolver::default();
        let resolved = resolver.resolve(&flight(2, Some(99)), &fleet()).unwrap();
        assert_eq!(resolved.airplane.name, "AirMax-720neo");
        assert_eq!(resolved.source, ResolutionSource::LegacyFlightRule);
    }

    #[test]
    fn test_modulo_fallback() {
        let resolver = AirplaneResolver::default();
        // (8 - 1) mod 3 = 1 -> second airplane by id
        let resolved = resolver.resolve(&flight(8, None), &fleet()).unwrap();
        assert_eq!(resolved.airplane.airplane_id, 2);
        assert_eq!(resolved.source, ResolutionSource::ModuloFallback);
    }

    #[test]
    fn test_legacy_rule_needs_matching_model() {
        let resolver = AirplaneResolver::default();
        let fleet = vec![Airplane { airplane_id: 5, name: "Regional 190".to_string() }];
        let resolved = resolver.resolve(&flight(1, None), &fleet).unwrap();
        assert_eq!(resolved.airplane.airplane_id, 5);
        assert_eq!(resolved.source, ResolutionSource::ModuloFallback);
    }

    #[test]
    fn test_stored_reference_can_be_disabled() {
        let resolver = AirplaneResolver::new(ResolverConfig {
            prefer_stored_reference: false,
            ..ResolverConfig::default()
        });
        let resolved = resolver.resolve(&flight(1, Some(2)), &fleet()).unwrap();
        assert_eq!(resolved.airplane.name, "AirNova-660");
        assert_eq!(resolved.source, ResolutionSource::LegacyFlightRule);
    }

    #[test]
    fn test_empty_fleet_is_not_found() {
        let resolver = AirplaneResolver::default();
        let err = resolver.resolve(&flight(1, Some(1)), &[]).unwrap_err();
        assert!(matches!(err, CoreError::AirplaneNotFound(1)));
    }
}
