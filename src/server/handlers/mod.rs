pub mod landmarks;
pub mod routes;
pub mod users;
