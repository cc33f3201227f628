// Core types shared by every gridline crate: configuration, odds math, the
// odds data model, and the reference tables loaded at startup.

pub mod config;
pub mod injury;
pub mod market;
pub mod odds;
pub mod reference;
pub mod roster;
pub mod stats;
pub mod teams;
