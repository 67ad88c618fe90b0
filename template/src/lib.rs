mod emitter;
mod intrinsic;
mod node;
mod patch;
mod template;

pub use intrinsic::Intrinsic;
pub use node::{Mapping, Node};
pub use patch::{Patch, DEFAULT_CODE_URI, DEFAULT_FUNCTIONS};
pub use template::{Function, Template, FUNCTION_TYPES};
