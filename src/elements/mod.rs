//! Structural elements module

mod beam;
mod frame;
mod material;
mod node;
mod orientation;
mod section;
mod support;

pub use beam::{Beam, Ranged};
pub use frame::FrameElement;
pub use material::Material;
pub use node::Node;
pub(crate) use node::distance;
pub use orientation::Orientation;
pub use section::CrossSection;
pub use support::{Dof, Support};
