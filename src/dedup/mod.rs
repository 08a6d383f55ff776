mod seen_set;

pub use seen_set::{SeenSet, SeenStore};
