/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Time(pub f64); // seconds

impl Time {
    pub const ZERO: Time = Time(0.0);

    /// `requestAnimationFrame` hands out `DOMHighResTimeStamp` milliseconds.
    pub fn from_millis(ms: f64) -> Self {
        Time(ms / 1000.0)
    }

    pub fn since(self, earlier: Time) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;

    #[test]
    fn millis_convert_to_seconds() {
        assert_eq!(Time::from_millis(1500.0), Time(1.5));
    }

    #[test]
    fn since_never_goes_negative() {
        assert_eq!(Time(2.0).since(Time(0.5)), 1.5);
        assert_eq!(Time(0.5).since(Time(2.0)), 0.0);
    }
}
