pub mod click;
pub mod dump;
pub mod resolve;
pub mod toolbar;
