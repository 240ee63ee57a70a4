mod http_fact_client;

pub use http_fact_client::HttpFactClient;
