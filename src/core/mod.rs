// Core exports
pub mod exclusions;
pub mod picker;
pub mod session;

pub use exclusions::ExclusionSet;
pub use picker::{OutfitSource, Pick, PickError, Picker};
pub use session::SessionState;
