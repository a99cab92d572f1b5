mod debug_routes;
mod debug_smtp;
