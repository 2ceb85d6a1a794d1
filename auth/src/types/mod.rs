//! Primitive value types shared by the transaction model and the sign modes.

pub mod address;
pub mod any;
pub mod coin;

pub use address::{AccAddress, AddressError, ValAddress};
pub use any::Any;
pub use coin::{Coin, CoinError, Coins};
