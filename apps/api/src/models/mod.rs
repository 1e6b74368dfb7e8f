pub mod ats;
pub mod billing;
pub mod document;
pub mod identity;
pub mod network;
