mod health;
mod redirect;
mod retrieve;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use retrieve::retrieve_original_handler;
