pub mod form;
pub mod models;
pub mod network;
