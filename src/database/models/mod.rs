pub mod clock;
pub mod preference;

pub use clock::*;
pub use preference::*;
