pub mod record;
pub mod render;
pub mod summary;

pub use record::*;
pub use render::*;
pub use summary::*;
