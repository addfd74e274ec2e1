pub mod connection;
pub mod events;
pub mod summary;
pub mod sync;
pub mod transport;
