//! Types for the passenger forecast feed of the airport data portal.
//!
//! The portal hands out one record per hourly time slot, with every count as an
//! optional string. [`raw`] mirrors that payload; [`normalized`] turns it into
//! plain integers, and [`selection`] has the small enums the UI side filters by.

pub mod deser;
pub mod raw;
pub mod normalized;
pub mod selection;

pub use crate::raw::*;
pub use crate::normalized::*;
pub use crate::selection::*;

#[cfg(test)]
mod tests;
