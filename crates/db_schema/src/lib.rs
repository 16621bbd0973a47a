#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_derive_newtype;

pub mod newtypes;
pub mod source;
pub mod traits;
pub mod utils;

pub mod impls;
