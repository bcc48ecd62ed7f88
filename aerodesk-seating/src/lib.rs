pub mod classifier;
pub mod config;
pub mod grouping;
pub mod layout;
pub mod observer;
pub mod planner;
pub mod resolver;
pub mod scheduler;
pub mod seat_class;
pub mod selector;
pub mod service;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;

pub use classifier::AgePolicy;
pub use config::SeatingConfig;
pub use grouping::{GroupMember, PriorityWeights, PurchaseGroup};
pub use layout::{seat_distance, CabinLayout, CabinZone, LayoutCatalog};
pub use observer::{AllocationObserver, NullObserver, TracingObserver};
pub use planner::{CheckInResult, FlightSnapshot, SeatAssignment, SeatPlanner, SkippedGroup};
pub use resolver::{AirplaneResolver, ResolutionSource, ResolvedAirplane};
pub use scheduler::GroupScheduler;
pub use seat_class::{SeatClass, SeatClassTable};
pub use selector::SeatPick;
pub use service::CheckInService;
pub use summary::CheckInSummary;
