//! Access to the Open-Meteo historical weather archive.

pub mod client;
pub mod error;
pub mod response;
