pub mod annotation;
pub mod feature;
pub mod io;
pub mod level;
