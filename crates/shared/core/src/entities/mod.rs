mod distribution;
mod event;
mod market_state;
mod position;
mod role;

pub use distribution::Distribution;
pub use event::{Event, EventKind};
pub use market_state::MarketState;
pub use position::Position;
pub use role::Role;
