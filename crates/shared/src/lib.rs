//! Types shared by the guide's navigator, calculators, storage and front ends.

pub mod domain;
pub mod error;
pub mod protocol;
