use foundation::time::Time;

/// Per-draw frame metadata handed to the renderer by the loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based index of the draw since the loop last started from idle.
    pub index: u64,
    /// Display timestamp of the callback that produced this frame.
    pub time: Time,
    /// Seconds since the previous frame; 0 for the first frame.
    pub dt_s: f64,
}

impl Frame {
    pub fn first(time: Time) -> Self {
        Self {
            index: 0,
            time,
            dt_s: 0.0,
        }
    }

    pub fn next(self, time: Time) -> Self {
        Self {
            index: self.index + 1,
            time,
            dt_s: time.since(self.time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;
    use foundation::time::Time;

    #[test]
    fn first_frame_has_no_delta() {
        let f = Frame::first(Time(3.0));
        assert_eq!(f.index, 0);
        assert_eq!(f.dt_s, 0.0);
    }

    #[test]
    fn next_advances_index_and_measures_delta() {
        let f1 = Frame::first(Time(1.0)).next(Time(1.5));
        assert_eq!(f1.index, 1);
        assert_eq!(f1.time, Time(1.5));
        assert_eq!(f1.dt_s, 0.5);
    }
}
