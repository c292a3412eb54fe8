//! Request types for the resource façades
//!
//! Each type validates itself and converts into the [`XmlFields`] of its
//! request document.

use crate::encode::{XmlFields, XmlValue};
use crate::error::{Error, Result};
use crate::types::{OptionStringExt, TransporterCode};
use crate::xml_fields;
use chrono::{DateTime, FixedOffset, NaiveDate};

// ============================================================================
// Shipments
// ============================================================================

/// How a shipment reaches the customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipmentDelivery {
    /// A shipping label bought through the API
    Label { shipping_label_code: String },
    /// The retailer's own carrier
    Transport {
        transporter: Option<TransporterCode>,
        track_and_trace: Option<String>,
    },
}

/// Body of a `ShipmentRequest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentRequest {
    pub order_item_id: String,
    pub date_time: DateTime<FixedOffset>,
    pub expected_delivery_date: Option<NaiveDate>,
    pub shipment_reference: Option<String>,
    pub delivery: ShipmentDelivery,
}

impl ShipmentRequest {
    /// Shipment sent with the retailer's own carrier
    pub fn with_transport(
        order_item_id: impl Into<String>,
        date_time: DateTime<FixedOffset>,
        transporter: TransporterCode,
        track_and_trace: impl Into<String>,
    ) -> Self {
        Self {
            order_item_id: order_item_id.into(),
            date_time,
            expected_delivery_date: None,
            shipment_reference: None,
            delivery: ShipmentDelivery::Transport {
                transporter: Some(transporter),
                track_and_trace: Some(track_and_trace.into()),
            },
        }
    }

    /// Shipment sent with a purchased label
    pub fn with_label(
        order_item_id: impl Into<String>,
        date_time: DateTime<FixedOffset>,
        shipping_label_code: impl Into<String>,
    ) -> Self {
        Self {
            order_item_id: order_item_id.into(),
            date_time,
            expected_delivery_date: None,
            shipment_reference: None,
            delivery: ShipmentDelivery::Label {
                shipping_label_code: shipping_label_code.into(),
            },
        }
    }

    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.shipment_reference = reference.into().none_if_empty();
        self
    }

    #[must_use]
    pub fn expected_delivery(mut self, date: NaiveDate) -> Self {
        self.expected_delivery_date = Some(date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.order_item_id.trim().is_empty() {
            return Err(Error::invalid_argument("order_item_id", "must not be empty"));
        }
        if let ShipmentDelivery::Label {
            shipping_label_code,
        } = &self.delivery
        {
            if shipping_label_code.trim().is_empty() {
                return Err(Error::invalid_argument(
                    "shipping_label_code",
                    "must not be empty",
                ));
            }
        }
        Ok(())
    }

    pub fn to_fields(&self) -> XmlFields {
        let mut fields = xml_fields! {
            "OrderItemId" => self.order_item_id.as_str(),
            "DateTime" => self.date_time,
            "ExpectedDeliveryDate" => self.expected_delivery_date,
            "ShipmentReference" => self.shipment_reference.clone(),
        };

        match &self.delivery {
            ShipmentDelivery::Label {
                shipping_label_code,
            } => {
                fields.insert(
                    "ShippingLabelCode".to_string(),
                    XmlValue::from(shipping_label_code.as_str()),
                );
            }
            ShipmentDelivery::Transport {
                transporter,
                track_and_trace,
            } => {
                fields.insert(
                    "Transport".to_string(),
                    XmlValue::Map(xml_fields! {
                        "TransporterCode" => *transporter,
                        "TrackAndTrace" => track_and_trace.clone(),
                    }),
                );
            }
        }

        fields
    }
}

// ============================================================================
// Invoices
// ============================================================================

/// Inclusive invoice period, sent as `from/to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoicePeriod {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl InvoicePeriod {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(Error::invalid_argument(
                "period",
                format!("{from} is after {to}"),
            ));
        }
        Ok(Self { from, to })
    }

    pub fn query_value(&self) -> String {
        format!("{}/{}", self.from.format("%Y-%m-%d"), self.to.format("%Y-%m-%d"))
    }
}

// ============================================================================
// Inbounds
// ============================================================================

/// Delivery window of an inbound shipment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

/// Carrier delivering an inbound shipment to the warehouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FbbTransporter {
    pub code: String,
    pub name: String,
}

/// One announced product of an inbound shipment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundProduct {
    pub ean: String,
    pub announced_quantity: u32,
}

impl InboundProduct {
    pub fn new(ean: impl Into<String>, announced_quantity: u32) -> Self {
        Self {
            ean: ean.into(),
            announced_quantity,
        }
    }
}

/// Body of an `InboundRequest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub reference: Option<String>,
    pub time_slot: TimeSlot,
    pub fbb_transporter: FbbTransporter,
    pub labelling_service: bool,
    pub products: Vec<InboundProduct>,
}

impl InboundRequest {
    pub fn validate(&self) -> Result<()> {
        if self.time_slot.start >= self.time_slot.end {
            return Err(Error::invalid_argument(
                "time_slot",
                "Start must be before End",
            ));
        }
        if self.fbb_transporter.code.trim().is_empty() {
            return Err(Error::invalid_argument("fbb_transporter", "Code is required"));
        }
        if self.fbb_transporter.name.trim().is_empty() {
            return Err(Error::invalid_argument("fbb_transporter", "Name is required"));
        }
        if self.products.is_empty() {
            return Err(Error::invalid_argument("products", "at least one product is required"));
        }
        for product in &self.products {
            if product.ean.is_empty() || !product.ean.chars().all(|c| c.is_ascii_digit()) {
                return Err(Error::invalid_argument(
                    "products",
                    format!("EAN '{}' must be numeric", product.ean),
                ));
            }
            if product.announced_quantity == 0 {
                return Err(Error::invalid_argument(
                    "products",
                    format!("AnnouncedQuantity for EAN {} must be positive", product.ean),
                ));
            }
        }
        Ok(())
    }

    pub fn to_fields(&self) -> XmlFields {
        let products: Vec<XmlFields> = self
            .products
            .iter()
            .map(|p| {
                xml_fields! {
                    "Product" => xml_fields! {
                        "EAN" => p.ean.as_str(),
                        "AnnouncedQuantity" => p.announced_quantity,
                    },
                }
            })
            .collect();

        xml_fields! {
            "Reference" => self.reference.clone(),
            "LabellingService" => self.labelling_service,
            "TimeSlot" => xml_fields! {
                "Start" => self.time_slot.start,
                "End" => self.time_slot.end,
            },
            "FbbTransporter" => xml_fields! {
                "Code" => self.fbb_transporter.code.as_str(),
                "Name" => self.fbb_transporter.name.as_str(),
            },
            "Products" => products,
        }
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Filters of the inventory listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryQuery {
    pub page: Option<u32>,
    /// Quantity range such as `0-10`
    pub quantity: Option<String>,
    /// `sufficient` or `insufficient`
    pub stock: Option<String>,
    /// `saleable` or `unsaleable`
    pub state: Option<String>,
    /// EAN, BSKU or title search
    pub query: Option<String>,
}

impl InventoryQuery {
    pub fn validate(&self) -> Result<()> {
        if self.page == Some(0) {
            return Err(Error::invalid_argument("page", "pages start at 1"));
        }
        Ok(())
    }
}
