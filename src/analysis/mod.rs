pub mod risk;
pub mod stage;
pub mod timeline;
