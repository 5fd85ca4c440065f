pub mod errors;
pub mod models;

pub mod local;
pub mod preferences;
pub mod remote;

pub mod chart;
pub mod coins;
pub mod detail;
pub mod favourites;
pub mod market;
pub mod search;

pub use errors::{DataResult, Error, Result};
pub use models::{Percentage, Price};
