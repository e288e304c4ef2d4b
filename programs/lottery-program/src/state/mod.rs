pub use lottery::*;
pub use pool::*;

pub mod lottery;
pub mod pool;
