//! Solar search: find the brightest orientation among a fixed set of candidates.
//!
//! The search visits every candidate once, choosing each next hop greedily
//! by weighted actuation cost, asks the light comparator at each stop and
//! finally returns to the brightest one.

mod constellation;
mod engine;

pub use constellation::{Candidate, Constellation, CANDIDATE_COUNT};
pub use engine::{weighted_cost, SearchReport, SolarSearch};
