mod generate;
mod matrix;

pub use generate::generate;
pub use matrix::matrix;
