//! Error types for solar-rack.
//!
//! Provides unified error handling across configuration, actuation, angle
//! persistence, sensors and the rack façade.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all solar-rack operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Stepper or drive motor error
    Motor(MotorError),
    /// Persisted angle could not be read or written
    Storage(StorageError),
    /// Limit switch or light comparator error
    Sensor(SensorError),
    /// Command rejected at the rack boundary
    Rack(RackError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Steps per revolution must be > 0
    InvalidStepsPerRevolution(u16),
    /// Step rate must be > 0
    InvalidStepRate(u32),
    /// Steps per degree must be > 0 (explicit or derived from the gear ratio)
    InvalidStepsPerDegree(u32),
    /// Gear ratio must be > 0
    InvalidGearRatio(f32),
    /// Maximum angle must be > 0
    InvalidMaxAngle(u16),
    /// Angle file name must not be empty
    EmptyAngleFile,
    /// Duty cycle ceiling must be 1-100
    InvalidDutyCycleMax(u8),
    /// Drive acceleration rate must be > 0
    InvalidAccelerationRate(u8),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Homing requested on an axis without a limit switch
    NoLimitSwitch,
    /// Required builder field missing
    MissingField(&'static str),
}

/// Angle persistence errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Nothing has been stored yet
    Missing,
    /// Stored text is not a decimal integer
    Corrupt(heapless::String<32>),
    /// Underlying I/O failure
    Io(heapless::String<128>),
}

/// Sensor errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorError {
    /// Pin read or write failed
    PinError,
}

/// Rack façade errors.
#[derive(Debug, Clone, PartialEq)]
pub enum RackError {
    /// A nudge would leave the axis range
    OutOfRange {
        /// Axis name
        axis: heapless::String<32>,
        /// Requested angle in degrees
        target: i32,
        /// Axis range is -max..=max
        max: u16,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Storage(e) => write!(f, "Storage error: {}", e),
            Error::Sensor(e) => write!(f, "Sensor error: {}", e),
            Error::Rack(e) => write!(f, "Rack error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidStepsPerRevolution(v) => {
                write!(f, "Invalid steps per revolution: {}. Must be > 0", v)
            }
            ConfigError::InvalidStepRate(v) => write!(f, "Invalid steps per second: {}. Must be > 0", v),
            ConfigError::InvalidStepsPerDegree(v) => write!(f, "Invalid steps per degree: {}. Must be > 0", v),
            ConfigError::InvalidGearRatio(v) => write!(f, "Invalid gear ratio: {}. Must be > 0", v),
            ConfigError::InvalidMaxAngle(v) => write!(f, "Invalid max angle: {}. Must be > 0", v),
            ConfigError::EmptyAngleFile => write!(f, "Angle file name is empty"),
            ConfigError::InvalidDutyCycleMax(v) => write!(f, "Invalid duty cycle max: {}. Must be 1-100", v),
            ConfigError::InvalidAccelerationRate(v) => {
                write!(f, "Invalid acceleration rate: {}. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::NoLimitSwitch => write!(f, "Axis has no limit switch to home against"),
            MotorError::MissingField(field) => write!(f, "{} is required", field),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Missing => write!(f, "No stored angle"),
            StorageError::Corrupt(text) => write!(f, "Stored angle '{}' is not an integer", text),
            StorageError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::PinError => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for RackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RackError::OutOfRange { axis, target, max } => {
                write!(f, "Axis '{}' target {} outside [-{}, {}]", axis, target, max, max)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Error::Sensor(e)
    }
}

impl From<RackError> for Error {
    fn from(e: RackError) -> Self {
        Error::Rack(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for StorageError {}

#[cfg(feature = "std")]
impl std::error::Error for SensorError {}

#[cfg(feature = "std")]
impl std::error::Error for RackError {}

/// Copy `text` into a bounded string, truncating on a char boundary.
pub(crate) fn bounded<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
