//! Worldclock Engine
//!
//! Keeps up to four clocks in step with one shared "virtual now":
//!
//! - **Slots**: ordered list of locations, bounded to `MIN_SLOTS..=MAX_SLOTS`
//! - **Reference**: the shared timestamp, overwritten by each tick while running
//! - **Overrides**: a slot can be pinned to its own instant until cleared
//! - **Device location**: one resolved fix per session rewrites slot 0
//!
//! ## State machine
//!
//! ```text
//!            toggle_running()
//!   ┌─────────┐ ─────────▶ ┌─────────┐
//!   │ RUNNING │            │ PAUSED  │   advance(t) ignored
//!   └─────────┘ ◀───────── └─────────┘
//!   advance(t):  toggle_running()
//!   reference = t
//! ```

pub mod config;
pub mod engine;
pub mod state;
pub mod view;

// Re-export main types
pub use config::{DeviceSlotPolicy, EngineConfig, MAX_SLOTS, MIN_SLOTS};
pub use engine::ClockEngine;
pub use state::RunState;
pub use view::{EffectiveTime, EngineSnapshot, SlotView};
