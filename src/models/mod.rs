pub mod feedback;
pub mod registration;
pub mod remote;
