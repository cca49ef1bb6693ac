//! Distribution Market Clocks
//!
//! Time sources for event timestamps:
//!
//! - [`SystemClock`]: wall-clock time, for live runs
//! - [`ManualClock`]: frozen time that only moves when told to, for
//!   deterministic tests and scripted scenarios
//!
//! ## Usage
//!
//! ```ignore
//! use distmarket_clock::ManualClock;
//! use chrono::Duration;
//!
//! let clock = ManualClock::starting_at_epoch();
//! let t0 = clock.now();
//! clock.advance(Duration::seconds(5));
//! assert_eq!(clock.now() - t0, Duration::seconds(5));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use distmarket_ports::Clock;
