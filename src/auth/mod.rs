pub mod gate;
pub mod password;
