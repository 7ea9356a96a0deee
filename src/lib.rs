#[macro_use]
mod macros;

pub mod abe;
pub mod abe_attribute;
pub mod aes;
pub mod api;
pub mod bn254;
pub mod config;
pub mod errors;
pub mod group;
pub mod hash;
pub mod hybrid;
pub mod ibe;
pub mod models;
pub mod party;
pub mod secret_sharing;
