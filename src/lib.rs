pub mod config;
pub mod console;
pub mod currency;
pub mod history;
pub mod model;
pub mod session;
pub mod validation;
