pub mod motion;

pub use motion::{Arena, MotionParams, MotionSimulator};
