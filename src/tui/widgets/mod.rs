pub mod header;
pub mod next_prayer;
pub mod prayers;
pub mod search;
pub mod statusbar;
