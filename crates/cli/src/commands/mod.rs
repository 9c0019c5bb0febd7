pub mod summary;
pub mod tcl;
pub mod util;

pub use summary::*;
pub use tcl::*;
pub use util::*;
