use crate::seat_class::SeatClass;
use aerodesk_shared::Seat;
use serde::{Deserialize, Serialize};

/// A block of consecutive rows sharing one set of seat columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CabinZone {
    pub first_row: i32,
    pub last_row: i32,
    pub columns: Vec<char>,
}

impl CabinZone {
    fn contains(&self, row: i32, column: char) -> bool {
        (self.first_row..=self.last_row).contains(&row) && self.columns.contains(&column)
    }
}

/// Window columns that apply to one cabin class only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassWindows {
    pub class: SeatClass,
    pub columns: Vec<char>,
}

/// Cabin geometry of one airplane model.
///
/// `model` is matched as a substring of the airplane name. A layout with no
/// zones accepts every seat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CabinLayout {
    pub model: String,
    #[serde(default)]
    pub zones: Vec<CabinZone>,
    pub window_columns: Vec<char>,
    #[serde(default)]
    pub class_window_columns: Vec<ClassWindows>,
}

impl CabinLayout {
    /// Layout used for models nobody has described: any position, windows in column A.
    pub fn unrestricted(model: &str) -> Self {
        Self {
            model: model.to_string(),
            zones: Vec::new(),
            window_columns: vec!['A'],
            class_window_columns: Vec::new(),
        }
    }

    pub fn is_valid_position(&self, row: i32, column: char) -> bool {
        if self.zones.is_empty() {
            return true;
        }
        let column = column.to_ascii_uppercase();
        self.zones.iter().any(|zone| zone.contains(row, column))
    }

    pub fn is_valid_seat(&self, seat: &Seat) -> bool {
        match seat.column_letter() {
            Some(column) => self.is_valid_position(seat.seat_row, column),
            None => self.zones.is_empty(),
        }
    }

    pub fn window_columns_for(&self, class: SeatClass) -> &[char] {
        self.class_window_columns
            .iter()
            .find(|w| w.class == class)
            .map(|w| w.columns.as_slice())
            .unwrap_or(&self.window_columns)
    }

    pub fn is_window(&self, seat: &Seat, class: SeatClass) -> bool {
        seat.column_letter()
            .is_some_and(|column| self.window_columns_for(class).contains(&column))
    }
}

/// Known cabin layouts, looked up by airplane model name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutCatalog {
    pub layouts: Vec<CabinLayout>,
}

impl Default for LayoutCatalog {
    fn default() -> Self {
        fn zone(first_row: i32, last_row: i32, columns: &str) -> CabinZone {
            CabinZone {
                first_row,
                last_row,
                columns: columns.chars().collect(),
            }
        }

        Self {
            layouts: vec![
                CabinLayout {
                    model: "AirNova-660".to_string(),
                    zones: vec![
                        zone(1, 4, "ABEF"),
                        zone(8, 15, "ABCEFG"),
                        zone(19, 34, "ABCEFG"),
                    ],
                    window_columns: vec!['A', 'G'],
                    class_window_columns: vec![ClassWindows {
                        class: SeatClass::FirstOrBusiness,
                        columns: vec!['A', 'F'],
                    }],
                },
                CabinLayout {
                    model: "AirMax-720neo".to_string(),
                    zones: vec![
                        zone(1, 5, "AEI"),
                        zone(9, 14, "ABDEFHI"),
                        zone(18, 31, "ABDEFHI"),
                    ],
                    window_columns: vec!['A', 'I'],
                    class_window_columns: Vec::new(),
                },
            ],
        }
    }
}

impl LayoutCatalog {
    pub fn find(&self, airplane_name: &str) -> Option<&CabinLayout> {
        self.layouts
            .iter()
            .find(|layout| airplane_name.contains(&layout.model))
    }

    /// Layout for the airplane, or an unrestricted one for unknown models.
    pub fn layout_for(&self, airplane_name: &str) -> CabinLayout {
        match self.find(airplane_name) {
            Some(layout) => layout.clone(),
            None => {
                tracing::debug!(
                    airplane = airplane_name,
                    "No cabin layout configured, all seats accepted"
                );
                CabinLayout::unrestricted(airplane_name)
            }
        }
    }
}

/// Manhattan distance over row number and column letter.
pub fn seat_distance(a: &Seat, b: &Seat) -> i32 {
    let column = |seat: &Seat| seat.column_letter().map(|c| c as i32 - 'A' as i32).unwrap_or(0);
    (a.seat_row - b.seat_row).abs() + (column(a) - column(b)).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(row: i32, column: &str) -> Seat {
        Seat {
            seat_id: 1,
            seat_row: row,
            seat_column: column.to_string(),
            seat_type_id: 1,
            airplane_id: 1,
        }
    }

    #[test]
    fn test_airnova_geometry() {
        let catalog = LayoutCatalog::default();
        let layout = catalog.find("AirNova-660 (LATAM)").unwrap();

        assert!(layout.is_valid_position(1, 'A'));
        assert!(layout.is_valid_position(4, 'F'));
        assert!(!layout.is_valid_position(2, 'C'));
        assert!(!layout.is_valid_position(5, 'A'));
        assert!(!layout.is_valid_position(7, 'A'));
        assert!(layout.is_valid_position(8, 'C'));
        assert!(layout.is_valid_position(15, 'G'));
        assert!(!layout.is_valid_position(16, 'A'));
        assert!(!layout.is_valid_position(18, 'B'));
        assert!(layout.is_valid_position(19, 'A'));
        assert!(layout.is_valid_position(34, 'G'));
        assert!(!layout.is_valid_position(35, 'A'));
        assert!(!layout.is_valid_position(20, 'D'));
    }

    #[test]
    fn test_airnova_windows_depend_on_class() {
        let catalog = LayoutCatalog::default();
        let layout = catalog.find("AirNova-660").unwrap();

        assert!(layout.is_window(&seat(2, "F"), SeatClass::FirstOrBusiness));
        assert!(!layout.is_window(&seat(20, "F"), SeatClass::Economy));
        assert!(layout.is_window(&seat(20, "G"), SeatClass::Economy));
        assert!(layout.is_window(&seat(10, "A"), SeatClass::EconomyPremium));
    }

    #[test]
    fn test_airmax_geometry() {
        let catalog = LayoutCatalog::default();
        let layout = catalog.find("AirMax-720neo").unwrap();

        assert!(layout.is_valid_position(3, 'E'));
        assert!(!layout.is_valid_position(3, 'B'));
        assert!(!layout.is_valid_position(6, 'A'));
        assert!(layout.is_valid_position(9, 'H'));
        assert!(!layout.is_valid_position(12, 'C'));
        assert!(!layout.is_valid_position(16, 'A'));
        assert!(layout.is_valid_position(31, 'I'));
        assert!(!layout.is_valid_position(32, 'I'));

        for class in [SeatClass::FirstOrBusiness, SeatClass::Economy] {
            assert!(layout.is_window(&seat(10, "I"), class));
            assert!(!layout.is_window(&seat(10, "E"), class));
        }
    }

    #[test]
    fn test_unknown_model_accepts_everything() {
        let catalog = LayoutCatalog::default();
        assert!(catalog.find("Boeing 737").is_none());

        let layout = catalog.layout_for("Boeing 737");
        assert!(layout.is_valid_seat(&seat(99, "K")));
        assert!(layout.is_window(&seat(3, "A"), SeatClass::Economy));
        assert!(!layout.is_window(&seat(3, "F"), SeatClass::Economy));
    }

    #[test]
    fn test_seat_distance() {
        assert_eq!(seat_distance(&seat(10, "A"), &seat(10, "A")), 0);
        assert_eq!(seat_distance(&seat(10, "A"), &seat(10, "B")), 1);
        assert_eq!(seat_distance(&seat(10, "A"), &seat(12, "C")), 4);
        assert_eq!(seat_distance(&seat(12, "C"), &seat(10, "A")), 4);
    }
}
