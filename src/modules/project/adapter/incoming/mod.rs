pub mod bus;
pub mod web;
