//! Value objects - immutable types that represent domain concepts

mod actor;
mod ids;
mod image;
mod map_location;

pub use actor::{ActionContext, Actor, RequestMeta};
pub use ids::{AuditRecordId, IdParseError, ModificationRequestId, MuralId};
pub use image::ImageRef;
pub use map_location::{Coordinates, MapLocation};
