//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod house_repo;
pub mod item_repo;
pub mod room_repo;
pub mod search_repo;

pub use house_repo::HouseRepo;
pub use item_repo::ItemRepo;
pub use room_repo::RoomRepo;
pub use search_repo::SearchRepo;
