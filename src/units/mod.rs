//! Unit data: the stat catalog and the class model

pub mod catalog;
pub mod class;

pub use catalog::{UnitCatalog, UnitStat};
pub use class::{ClassCounts, ClassShares, UnitClass, UnitRole};
