//! Transport adapters implementing the `HttpClient` port.

mod reqwest_client;
mod router;
mod simulated_client;

pub use reqwest_client::ReqwestHttpClient;
pub use router::ProtocolRouter;
pub use simulated_client::SimulatedProtocolClient;
