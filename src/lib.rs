pub mod checker;
pub mod ctx;
pub mod error;
pub mod layout;
pub mod path;
pub mod probe;
pub mod report;
pub mod util;
