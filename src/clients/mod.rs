//! Domain clients wrapping [`ResourceClient`](resource_store::ResourceClient).

pub mod bill_client;
pub mod order_client;
pub mod table_client;

pub use bill_client::*;
pub use order_client::*;
pub use table_client::*;
