pub mod handlers;

pub use handlers::route_not_found;
