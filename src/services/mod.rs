//! Remote service clients
//!
//! Hand-rolled SigV4 over reqwest for the two AWS surfaces the gateway
//! talks to: the Bedrock runtime and the AppConfig Data API.

pub mod appconfig;
pub mod bedrock;
pub mod sigv4;

pub use appconfig::{AppConfigDataClient, StrategyProvider};
pub use bedrock::BedrockRuntimeClient;
pub use sigv4::SigV4Signer;
