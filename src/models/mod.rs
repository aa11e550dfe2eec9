pub mod response;

pub use response::{value_to_display_string, MesRecord};
