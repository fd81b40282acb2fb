//! Load types

mod distributed;
mod node_load;

pub use distributed::{DistributedLoad, LoadDirection};
pub use node_load::NodeLoad;
