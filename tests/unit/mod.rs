//! Unit test harness for solar-rack.
//!
//! This module organizes configuration tests by concern.

mod config_parsing;
mod config_validation;
