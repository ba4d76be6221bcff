//! Digital sensors: the debounced limit switch and the light comparator.

mod comparator;
mod debounce;
mod limit_switch;

pub use comparator::{BrightnessComparator, LightComparator};
pub use debounce::DebouncedInput;
pub use limit_switch::{LimitSwitch, LimitSwitchInput, NoLimitSwitch};
