mod clock;
pub mod event;
pub mod timer;

pub use event::{SlotKey, TimerEvent};
pub use timer::Timer;
