//! Pure data structures: meals, cart line items, and order wire types.

pub mod cart;
pub mod meal;
pub mod order;

pub use cart::*;
pub use meal::*;
pub use order::*;
