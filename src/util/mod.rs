pub mod assert;
pub mod sorted_map;
pub mod strings;

pub use assert::{assertion_error, hard_assert};
pub use sorted_map::SortedMap;
pub use strings::{immediate_predecessor, immediate_successor};
