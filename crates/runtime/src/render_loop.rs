use foundation::time::Time;

use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// What the display callback must do after consulting the loop.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Tick {
    /// Schedule the next callback, then draw this frame.
    Draw(Frame),
    /// Do not reschedule. The callback chain ends here.
    Halt,
}

/// Two-state redraw loop driven by an external once-per-refresh scheduler.
///
/// The loop never owns the scheduler. The host calls [`RenderLoop::start`] and
/// schedules the first callback when it returns `true`; every callback then
/// asks [`RenderLoop::on_callback`] whether to keep going.
///
/// Cancellation is cooperative: [`RenderLoop::stop`] only flips the state, so
/// a callback that was already scheduled still fires once, sees `Stopped`
/// and halts without drawing.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: LoopState,
    last_frame: Option<Frame>,
    callback_pending: bool,
    frames_drawn: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// True while a scheduled callback has not fired yet.
    pub fn callback_pending(&self) -> bool {
        self.callback_pending
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Enter `Running`. Returns `true` when the caller must schedule the first
    /// callback, `false` when a chain is already alive.
    ///
    /// Restarting before the pending callback of a stopped chain fired revives
    /// that chain instead of starting a second one.
    pub fn start(&mut self) -> bool {
        self.state = LoopState::Running;
        if self.callback_pending {
            return false;
        }
        self.last_frame = None;
        self.callback_pending = true;
        true
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    /// Called from every scheduled callback with the display timestamp.
    pub fn on_callback(&mut self, time: Time) -> Tick {
        self.callback_pending = false;
        if self.state == LoopState::Stopped {
            return Tick::Halt;
        }

        let frame = match self.last_frame {
            Some(prev) => prev.next(time),
            None => Frame::first(time),
        };
        self.last_frame = Some(frame);
        self.callback_pending = true;
        self.frames_drawn += 1;
        Tick::Draw(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::{LoopState, RenderLoop, Tick};
    use foundation::time::Time;

    /// Drive the loop the way a refresh scheduler would: fire pending callbacks
    /// one at a time and count the draws.
    fn pump(lp: &mut RenderLoop, callbacks: usize, t0: f64) -> usize {
        let mut draws = 0;
        for i in 0..callbacks {
            if !lp.callback_pending() {
                break;
            }
            if let Tick::Draw(_) = lp.on_callback(Time(t0 + i as f64 / 60.0)) {
                draws += 1;
            }
        }
        draws
    }

    #[test]
    fn starts_stopped() {
        let lp = RenderLoop::new();
        assert_eq!(lp.state(), LoopState::Stopped);
        assert!(!lp.callback_pending());
    }

    #[test]
    fn start_schedules_first_frame() {
        let mut lp = RenderLoop::new();
        assert!(lp.start());
        assert!(lp.is_running());
        match lp.on_callback(Time(0.0)) {
            Tick::Draw(frame) => assert_eq!(frame.index, 0),
            Tick::Halt => panic!("running loop must draw"),
        }
        assert!(lp.callback_pending());
    }

    #[test]
    fn running_loop_keeps_drawing() {
        let mut lp = RenderLoop::new();
        lp.start();
        assert_eq!(pump(&mut lp, 10, 0.0), 10);
        assert_eq!(lp.frames_drawn(), 10);
    }

    #[test]
    fn frame_indices_and_deltas_advance() {
        let mut lp = RenderLoop::new();
        lp.start();
        let _ = lp.on_callback(Time(1.0));
        let Tick::Draw(second) = lp.on_callback(Time(1.25)) else {
            panic!("expected a draw");
        };
        assert_eq!(second.index, 1);
        assert_eq!(second.dt_s, 0.25);
    }

    #[test]
    fn stop_ends_chain_within_one_callback() {
        let mut lp = RenderLoop::new();
        lp.start();
        pump(&mut lp, 3, 0.0);
        lp.stop();

        // The already-scheduled callback fires once and halts.
        assert!(lp.callback_pending());
        assert_eq!(lp.on_callback(Time(1.0)), Tick::Halt);
        assert!(!lp.callback_pending());

        // Nothing left to fire.
        assert_eq!(pump(&mut lp, 5, 2.0), 0);
        assert_eq!(lp.frames_drawn(), 3);
    }

    #[test]
    fn double_start_does_not_fork_the_chain() {
        let mut lp = RenderLoop::new();
        assert!(lp.start());
        assert!(!lp.start());
    }

    #[test]
    fn restart_before_pending_callback_revives_chain() {
        let mut lp = RenderLoop::new();
        lp.start();
        pump(&mut lp, 1, 0.0);
        lp.stop();
        assert!(!lp.start());
        assert!(matches!(lp.on_callback(Time(0.5)), Tick::Draw(_)));
    }

    #[test]
    fn restart_after_halt_schedules_again() {
        let mut lp = RenderLoop::new();
        lp.start();
        pump(&mut lp, 2, 0.0);
        lp.stop();
        assert_eq!(lp.on_callback(Time(1.0)), Tick::Halt);

        assert!(lp.start());
        let Tick::Draw(frame) = lp.on_callback(Time(5.0)) else {
            panic!("expected a draw");
        };
        assert_eq!(frame.index, 0);
    }
}
