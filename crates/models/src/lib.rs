pub mod errors;
pub mod db;
pub mod service;
pub mod version;
pub mod api_key;

#[cfg(test)]
mod tests;
