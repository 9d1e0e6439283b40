//! Domain types for the freight router.
//!
//! This module contains the core domain model types that represent
//! validated shipping data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod currency;
mod error;
mod money;
mod port;
mod sailing;

pub use currency::{Currency, InvalidCurrency};
pub use error::DomainError;
pub use money::Money;
pub use port::{InvalidPortCode, PortCode};
pub use sailing::{Rate, Sailing};
