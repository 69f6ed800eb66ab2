pub mod envelope;
pub mod errors;
pub mod state;
pub mod auth;
pub mod deadline;
pub mod routes;
pub mod openapi;
pub mod startup;

pub use startup::run;
pub use state::AppState;
