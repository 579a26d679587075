pub mod connection;
pub mod hub;

pub use connection::{Connection, ConnectionReader};
pub use hub::Hub;
