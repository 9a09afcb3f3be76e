pub mod admin_route;
