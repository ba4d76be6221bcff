//! Logging abstraction.
//!
//! The crate logs through these macros so the same call sites work on hosts
//! and on embedded targets:
//! - default: the `log` facade (bring your own logger, e.g. `env_logger`)
//! - `defmt` feature: defmt, for probe-attached targets
//!
//! Arguments must be primitives or `&str` so both backends can format them.

macro_rules! rack_trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::trace!($($arg)*);
    }};
}

macro_rules! rack_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! rack_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! rack_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        ::log::warn!($($arg)*);
    }};
}

pub(crate) use {rack_debug, rack_info, rack_trace, rack_warn};
