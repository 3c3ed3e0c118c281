pub mod category;
pub mod persona;
pub mod post;
