pub mod company;
mod db;
pub mod employ;
pub mod extra_serving;
pub mod image;
pub mod login;
pub mod logout;
pub mod profile;
pub mod schedule;
pub mod testing;

pub use db::*;
