//! Zonation analysis over a well's designated zonelog
//!
//! - `holes` - short undefined runs between defined zones
//! - `interval` - contiguous segments of a single zone code

mod holes;
mod interval;

pub use holes::{find_zonation_holes, report_holes_batch};
pub use interval::change_point_ids;
