use serde::{Deserialize, Serialize};

/// Canonical cabin class every free-text seat type label is reduced to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum SeatClass {
    FirstOrBusiness,
    EconomyPremium,
    Economy,
}

impl SeatClass {
    pub fn is_business_bucket(self) -> bool {
        matches!(self, SeatClass::FirstOrBusiness | SeatClass::EconomyPremium)
    }
}

/// Keywords that identify one canonical class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSynonyms {
    pub class: SeatClass,
    pub keywords: Vec<String>,
}

/// Synonym table used to canonicalize seat type labels.
///
/// Entries are checked in order and the first keyword found anywhere in the
/// label (case-insensitive) wins. Labels matching nothing fall back to `fallback`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatClassTable {
    #[serde(default = "default_synonyms")]
    pub synonyms: Vec<ClassSynonyms>,
    #[serde(default = "default_fallback")]
    pub fallback: SeatClass,
}

fn default_fallback() -> SeatClass {
    SeatClass::Economy
}

fn default_synonyms() -> Vec<ClassSynonyms> {
    fn entry(class: SeatClass, keywords: &[&str]) -> ClassSynonyms {
        ClassSynonyms {
            class,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    vec![
        entry(
            SeatClass::FirstOrBusiness,
            &["primera", "first", "ejecutiva", "business"],
        ),
        entry(SeatClass::EconomyPremium, &["premium", "plus", "comfort"]),
        entry(
            SeatClass::Economy,
            &["economy", "economica", "económica", "turista", "coach"],
        ),
    ]
}

impl Default for SeatClassTable {
    fn default() -> Self {
        Self {
            synonyms: default_synonyms(),
            fallback: default_fallback(),
        }
    }
}

impl SeatClassTable {
    pub fn normalize(&self, label: &str) -> SeatClass {
        let label = label.to_lowercase();
        self.synonyms
            .iter()
            .find(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| label.contains(&keyword.to_lowercase()))
            })
            .map(|entry| entry.class)
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        let table = SeatClassTable::default();
        assert_eq!(table.normalize("Primera Clase"), SeatClass::FirstOrBusiness);
        assert_eq!(table.normalize("BUSINESS"), SeatClass::FirstOrBusiness);
        assert_eq!(table.normalize("Clase Ejecutiva"), SeatClass::FirstOrBusiness);
        assert_eq!(table.normalize("Premium Economy"), SeatClass::EconomyPremium);
        assert_eq!(table.normalize("Economy Plus"), SeatClass::EconomyPremium);
        assert_eq!(table.normalize("Comfort"), SeatClass::EconomyPremium);
        assert_eq!(table.normalize("Clase Turista"), SeatClass::Economy);
        assert_eq!(table.normalize("Económica"), SeatClass::Economy);
        assert_eq!(table.normalize("coach"), SeatClass::Economy);
    }

    #[test]
    fn test_unknown_label_falls_back_to_economy() {
        let table = SeatClassTable::default();
        assert_eq!(table.normalize(""), SeatClass::Economy);
        assert_eq!(table.normalize("standard"), SeatClass::Economy);
    }

    #[test]
    fn test_custom_table() {
        let table = SeatClassTable {
            synonyms: vec![ClassSynonyms {
                class: SeatClass::EconomyPremium,
                keywords: vec!["Extra Legroom".to_string()],
            }],
            fallback: SeatClass::Economy,
        };
        assert_eq!(table.normalize("extra legroom row"), SeatClass::EconomyPremium);
        assert_eq!(table.normalize("business"), SeatClass::Economy);
    }

    #[test]
    fn test_business_bucket() {
        assert!(SeatClass::FirstOrBusiness.is_business_bucket());
        assert!(SeatClass::EconomyPremium.is_business_bucket());
        assert!(!SeatClass::Economy.is_business_bucket());
    }
}
