//! Mini product read model: row hydration and the retrieval gateway.

pub mod hydration;
pub mod product_gateway;

pub use hydration::{MINI_MAPPINGS, Mapping, MiniHydrator, Presence};
pub use product_gateway::{GatewayError, PgProductGateway, ProductGateway};
