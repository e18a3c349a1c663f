pub mod store_server;
