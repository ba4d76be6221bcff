//! Light sensor comparator handshake.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{Result, SensorError};

/// Source of "brightest so far" answers for a series of light samples.
pub trait BrightnessComparator {
    /// Take one sample; true if it is the brightest of the current series.
    fn read(&mut self) -> Result<bool>;
}

/// Request/acknowledge link to an external brightness comparator.
///
/// The peripheral keeps the running maximum; this side is stateless. Each
/// read raises `request`, waits for `ready`, drops `request`, then watches
/// `brightest` until the peripheral releases `ready`. There is no timeout:
/// a silent peripheral blocks the caller forever.
pub struct LightComparator<REQ, ACK, BRIGHT>
where
    REQ: OutputPin,
    ACK: InputPin,
    BRIGHT: InputPin,
{
    request: REQ,
    ready: ACK,
    brightest: BRIGHT,
}

impl<REQ, ACK, BRIGHT> LightComparator<REQ, ACK, BRIGHT>
where
    REQ: OutputPin,
    ACK: InputPin,
    BRIGHT: InputPin,
{
    /// Take ownership of the handshake lines and idle the request line low.
    pub fn new(mut request: REQ, ready: ACK, brightest: BRIGHT) -> Result<Self> {
        request.set_low().map_err(|_| SensorError::PinError)?;
        Ok(Self {
            request,
            ready,
            brightest,
        })
    }

    /// Release the pins.
    pub fn free(self) -> (REQ, ACK, BRIGHT) {
        (self.request, self.ready, self.brightest)
    }
}

impl<REQ, ACK, BRIGHT> BrightnessComparator for LightComparator<REQ, ACK, BRIGHT>
where
    REQ: OutputPin,
    ACK: InputPin,
    BRIGHT: InputPin,
{
    fn read(&mut self) -> Result<bool> {
        self.request.set_high().map_err(|_| SensorError::PinError)?;
        while self.ready.is_low().map_err(|_| SensorError::PinError)? {
            core::hint::spin_loop();
        }
        self.request.set_low().map_err(|_| SensorError::PinError)?;

        // `brightest` is only meaningful while `ready` is held
        let mut brightest = false;
        loop {
            if self.brightest.is_high().map_err(|_| SensorError::PinError)? {
                brightest = true;
            }
            if self.ready.is_low().map_err(|_| SensorError::PinError)? {
                break;
            }
        }

        Ok(brightest)
    }
}
