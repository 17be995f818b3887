//! Haptic actuator trait

/// An actuator whose drive strength can be set as a percentage
///
/// Implementations own the conversion from percent to device units and any
/// device-side limits (e.g. half-scale clamping while acceleration is on).
pub trait HapticActuator {
    /// Error type for actuator operations
    type Error;

    /// Set drive strength, 0 = off, 100 = full scale
    ///
    /// Values above 100 are treated as 100.
    fn set_intensity(&mut self, percent: u8) -> Result<(), Self::Error>;

    /// Stop vibrating
    fn stop(&mut self) -> Result<(), Self::Error> {
        self.set_intensity(0)
    }
}
