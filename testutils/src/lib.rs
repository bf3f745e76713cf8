mod constants;
mod manifests;
mod matrix;

pub use constants::*;
pub use manifests::*;
pub use matrix::*;
