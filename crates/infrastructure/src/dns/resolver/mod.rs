mod core;
mod slist;
mod splice;

pub use self::core::{IterativeResolver, Resolved};
pub use slist::ServerList;
pub use splice::splice_chased_answer;
