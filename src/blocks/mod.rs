mod application;
mod comment;
mod cue_sheet;
mod picture;
mod seek_table;
mod stream_info;

pub use application::*;
pub use comment::*;
pub use cue_sheet::*;
pub use picture::*;
pub use seek_table::*;
pub use stream_info::*;
