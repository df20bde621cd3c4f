pub mod buffer;
pub mod controller;
pub mod countdown;
pub mod mode;
pub mod result;

pub use controller::{Controller, Effects, Frame, Progress, SessionEvent, SessionState, TimeFigure};
pub use mode::{Mode, ModeKind};
