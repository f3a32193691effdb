//! Data types shared by the layout, selection and range engines.

mod cell;
mod column;
mod events;
mod options;
mod row;
mod selection;

pub use cell::*;
pub use column::*;
pub use events::*;
pub use options::*;
pub use row::*;
pub use selection::*;
