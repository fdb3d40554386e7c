pub mod addr;
pub mod genie;
pub mod ines;
pub mod mapper;
pub mod palette;
pub mod tile;

pub use genie::GenieCode;
pub use ines::Header;
