mod attribute;
mod class;

pub use attribute::{AttrType, AttributeDef};
pub use class::ClassKind;
