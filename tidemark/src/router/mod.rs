pub mod attribute;
pub mod process;

pub mod util;
