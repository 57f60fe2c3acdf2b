/// Audio effects module
///
/// Volume fades for looping lines and the clamped volume level shared by all lines.

pub mod fade;
pub mod volume;

pub use fade::{Fade, FadeEnd, FadeStep};
pub use volume::Volume;
