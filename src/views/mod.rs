mod blocks;
mod rooms;
mod schedule;
mod shifts;

pub use blocks::Blocks;
pub use rooms::Rooms;
pub use schedule::Schedule;
pub use shifts::Shifts;
