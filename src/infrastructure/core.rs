mod guest;
mod host;
mod reservation;

pub use self::guest::*;
pub use self::host::*;
pub use self::reservation::*;
