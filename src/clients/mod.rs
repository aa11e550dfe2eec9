pub mod mes_client;

pub use mes_client::MesClient;
