pub mod company;
pub mod employ;
pub mod extra_serving;
pub mod image;
pub mod profile;
pub mod schedule;
pub mod session;

// Re-export models for easier access
pub use company::*;
pub use employ::*;
pub use extra_serving::*;
pub use image::*;
pub use profile::*;
pub use schedule::*;
pub use session::*;
