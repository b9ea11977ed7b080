pub mod container;
pub mod lifecycle;
pub mod views;

pub use container::*;
pub use lifecycle::*;
pub use views::*;
