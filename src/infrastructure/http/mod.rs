pub mod relay_http_client;
