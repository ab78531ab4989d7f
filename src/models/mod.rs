pub mod class;
pub mod registration;
pub mod student;

pub use class::{Class, ClassRequest};
pub use registration::Registration;
pub use student::{RosterEntry, Student, StudentRequest};
