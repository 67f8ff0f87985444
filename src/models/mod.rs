pub mod admission;
pub mod appointment;
pub mod catalog;
pub mod enums;
pub mod filters;
pub mod patient;

pub use admission::*;
pub use appointment::*;
pub use catalog::*;
pub use filters::*;
pub use patient::*;
