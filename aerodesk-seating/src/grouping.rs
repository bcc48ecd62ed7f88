use crate::classifier::AgePolicy;
use crate::seat_class::{SeatClass, SeatClassTable};
use aerodesk_shared::{BoardingPass, Passenger};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Scheduling weights. Higher priority groups pick seats first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriorityWeights {
    #[serde(default = "default_first_or_business")]
    pub first_or_business: i32,
    #[serde(default = "default_economy_premium")]
    pub economy_premium: i32,
    #[serde(default = "default_economy")]
    pub economy: i32,
    #[serde(default = "default_senior_bonus")]
    pub senior_bonus: i32,
    #[serde(default = "default_minor_bonus")]
    pub minor_bonus: i32,
    #[serde(default = "default_family_bonus")]
    pub family_bonus: i32,
}

fn default_first_or_business() -> i32 {
    3000
}

fn default_economy_premium() -> i32 {
    2000
}

fn default_economy() -> i32 {
    1000
}

fn default_senior_bonus() -> i32 {
    100
}

fn default_minor_bonus() -> i32 {
    50
}

fn default_family_bonus() -> i32 {
    1000
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            first_or_business: default_first_or_business(),
            economy_premium: default_economy_premium(),
            economy: default_economy(),
            senior_bonus: default_senior_bonus(),
            minor_bonus: default_minor_bonus(),
            family_bonus: default_family_bonus(),
        }
    }
}

impl PriorityWeights {
    pub fn base(&self, class: SeatClass) -> i32 {
        match class {
            SeatClass::FirstOrBusiness => self.first_or_business,
            SeatClass::EconomyPremium => self.economy_premium,
            SeatClass::Economy => self.economy,
        }
    }
}

/// One unassigned boarding pass inside a purchase group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMember {
    pub boarding_pass_id: i64,
    pub passenger_id: i64,
    pub age: Option<i32>,
    pub is_minor: bool,
}

/// All unassigned boarding passes of one purchase, scheduled as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseGroup {
    pub purchase_id: i64,
    /// Requested seat type label, taken from the first member.
    pub seat_type_label: String,
    pub seat_class: SeatClass,
    pub members: Vec<GroupMember>,
    pub has_minors: bool,
    pub has_adults: bool,
    pub has_seniors: bool,
    pub priority: i32,
}

impl PurchaseGroup {
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn is_family(&self) -> bool {
        self.has_minors && self.has_adults
    }

    pub fn is_unaccompanied(&self) -> bool {
        self.has_minors && !self.has_adults
    }

    pub fn minor_count(&self) -> usize {
        self.members.iter().filter(|m| m.is_minor).count()
    }
}

/// Builds purchase groups out of a flight's unassigned boarding passes.
pub struct GroupingEngine<'a> {
    pub classes: &'a SeatClassTable,
    pub ages: &'a AgePolicy,
    pub weights: &'a PriorityWeights,
}

impl GroupingEngine<'_> {
    /// Groups come back ordered by purchase id; members keep the order of `passes`.
    ///
    /// Already seated passes are ignored. A pass whose passenger record is
    /// missing counts as an adult of unknown age.
    pub fn group(
        &self,
        passes: &[BoardingPass],
        passengers: &HashMap<i64, &Passenger>,
        seat_type_labels: &HashMap<i64, &str>,
    ) -> Vec<PurchaseGroup> {
        let mut groups: BTreeMap<i64, PurchaseGroup> = BTreeMap::new();

        for pass in passes.iter().filter(|p| !p.is_seated()) {
            let age = passengers.get(&pass.passenger_id).and_then(|p| p.age);
            let is_minor = self.ages.is_minor_age(age);

            let group = groups.entry(pass.purchase_id).or_insert_with(|| {
                let label = seat_type_labels
                    .get(&pass.seat_type_id)
                    .copied()
                    .unwrap_or_default()
                    .to_string();
                PurchaseGroup {
                    purchase_id: pass.purchase_id,
                    seat_class: self.classes.normalize(&label),
                    seat_type_label: label,
                    members: Vec::new(),
                    has_minors: false,
                    has_adults: false,
                    has_seniors: false,
                    priority: 0,
                }
            });

            group.has_minors |= is_minor;
            group.has_adults |= !is_minor;
            group.has_seniors |= self.ages.is_senior_age(age);
            group.members.push(GroupMember {
                boarding_pass_id: pass.boarding_pass_id,
                passenger_id: pass.passenger_id,
                age,
                is_minor,
            });
        }

        groups
            .into_values()
            .map(|mut group| {
                group.priority = self.priority(&group);
                group
            })
            .collect()
    }

    /// Computed once per group, after all members are known.
    pub fn priority(&self, group: &PurchaseGroup) -> i32 {
        let mut priority = self.weights.base(group.seat_class);
        if group.has_seniors {
            priority += self.weights.senior_bonus;
        }
        if group.has_minors {
            priority += self.weights.minor_bonus;
        }
        if group.is_family() {
            priority += self.weights.family_bonus;
        }
        priority
    }
}
