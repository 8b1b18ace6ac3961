pub mod analysis;
pub mod bar;
pub mod filters;
pub mod screen;

pub use analysis::*;
pub use bar::*;
pub use filters::*;
pub use screen::*;
