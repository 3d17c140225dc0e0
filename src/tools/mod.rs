pub mod list;
pub mod pick;
pub mod refresh;
pub mod suggest;

pub use list::*;
pub use pick::*;
pub use refresh::*;
pub use suggest::*;
