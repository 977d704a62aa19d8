mod control;
mod geometry;
mod sound;

pub use control::{parse_heading_level, ControlDescriptor, Role, State};
pub use geometry::{CanvasSize, Position3D, ScreenRect};
pub use sound::{Placement, SoundClip, SoundId};
