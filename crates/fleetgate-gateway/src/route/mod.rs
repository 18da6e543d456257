//! Route table construction and resolution.

pub mod table;

pub use table::{Route, RouteTable};
