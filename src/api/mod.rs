//! Resource façades
//!
//! [`PlazaApi`] groups the endpoints of the seller API the way the service
//! does: one façade per resource group, each operation sending an encoded
//! request document (where one is needed) and decoding the answer against
//! the matching schema from [`crate::models`].
//!
//! ```rust,ignore
//! use plaza_client::api::PlazaApi;
//! use plaza_client::config::ClientConfig;
//!
//! let api = PlazaApi::new(ClientConfig::from_env()?)?;
//! let orders = api.orders().list(Some(1), None).await?;
//! ```

mod client;
mod resources;
mod types;

pub use client::{list_from, record_from, PlazaApi, ResourceGroup};
pub use resources::{
    Inbounds, Inventory, Invoices, Labels, Offers, Orders, ProcessStatuses, ReturnItems,
    Shipments, Transports,
};
pub use types::{
    FbbTransporter, InboundProduct, InboundRequest, InventoryQuery, InvoicePeriod,
    ShipmentDelivery, ShipmentRequest, TimeSlot,
};
