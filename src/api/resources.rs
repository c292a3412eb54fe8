//! Resource-group façades
//!
//! Thin wrappers that pick the URI, the request document and the response
//! schema for each operation. All transport and decoding work happens in
//! [`ResourceGroup`].

use super::client::{record_from, ResourceGroup};
use super::types::{InboundRequest, InventoryQuery, InvoicePeriod, ShipmentRequest};
use crate::decode::{Record, RecordList};
use crate::encode::{EncoderConfig, XmlFields, XmlValue};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use crate::models;
use crate::types::{FulfilmentMethod, Method, TransporterCode};
use crate::xml_fields;
use bytes::Bytes;
use chrono::NaiveDate;
use tracing::debug;

const ACCEPT_PDF: &str = "application/pdf";
const ACCEPT_CSV: &str = "text/csv";
const ACCEPT_ORDERS: &str = "application/vnd.orders-v2.1+xml";
const ACCEPT_SHIPMENTS: &str = "application/vnd.shipments-v2.1+xml";

macro_rules! resource_group {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name<'a> {
                group: ResourceGroup<'a>,
            }

            impl<'a> $name<'a> {
                pub(crate) fn new(group: ResourceGroup<'a>) -> Self {
                    Self { group }
                }
            }
        )+
    };
}

resource_group! {
    /// `orders` group
    Orders,
    /// `invoices` group
    Invoices,
    /// `process-status` group
    ProcessStatuses,
    /// `shipments` group
    Shipments,
    /// `transports` group
    Transports,
    /// `purchasable-shipping-labels` group
    Labels,
    /// `return-items` group
    ReturnItems,
    /// Offers API
    Offers,
    /// `inbounds` group (unversioned URIs)
    Inbounds,
    /// `inventory` group (unversioned URIs)
    Inventory,
}

fn log_count(operation: &str, list: &RecordList) {
    debug!(operation, items = list.len(), "decoded response");
}

// ============================================================================
// Orders, invoices, process status
// ============================================================================

impl Orders<'_> {
    /// List open orders
    pub async fn list(
        &self,
        page: Option<u32>,
        fulfilment_method: Option<FulfilmentMethod>,
    ) -> Result<RecordList> {
        let config = RequestConfig::new()
            .query_opt("page", page)
            .query_opt("fulfilment-method", fulfilment_method.map(|m| m.as_str()))
            .accept(ACCEPT_ORDERS);

        let orders = self.group.get_list(&models::ORDERS, "", config).await?;
        log_count("orders.list", &orders);
        Ok(orders)
    }
}

impl Invoices<'_> {
    pub async fn list(
        &self,
        order_id: Option<&str>,
        period: Option<InvoicePeriod>,
    ) -> Result<RecordList> {
        let config = RequestConfig::new()
            .query_opt("orderId", order_id)
            .query_opt("period", period.map(|p| p.query_value()));

        let invoices = self.group.get_list(&models::INVOICES, "", config).await?;
        log_count("invoices.list", &invoices);
        Ok(invoices)
    }

    pub async fn get(&self, invoice_id: &str) -> Result<Record> {
        self.group
            .get_record(&models::INVOICE, &format!("/{invoice_id}"), RequestConfig::new())
            .await
    }

    pub async fn specification(&self, invoice_id: &str, page: Option<u32>) -> Result<RecordList> {
        let config = RequestConfig::new().query_opt("page", page);
        let items = self
            .group
            .get_list(
                &models::INVOICE_SPECIFICATION,
                &format!("/{invoice_id}/specification"),
                config,
            )
            .await?;
        log_count("invoices.specification", &items);
        Ok(items)
    }
}

impl ProcessStatuses<'_> {
    pub async fn get(&self, id: &str) -> Result<Record> {
        self.group
            .get_record(&models::PROCESS_STATUS, &format!("/{id}"), RequestConfig::new())
            .await
    }
}

// ============================================================================
// Shipments, transports, labels
// ============================================================================

impl Shipments<'_> {
    pub async fn list(
        &self,
        page: Option<u32>,
        fulfilment_method: Option<FulfilmentMethod>,
        order_id: Option<&str>,
    ) -> Result<RecordList> {
        let config = RequestConfig::new()
            .query_opt("page", page)
            .query_opt("order-id", order_id)
            .query_opt("fulfilment-method", fulfilment_method.map(|m| m.as_str()))
            .accept(ACCEPT_SHIPMENTS);

        let shipments = self.group.get_list(&models::SHIPMENTS, "", config).await?;
        log_count("shipments.list", &shipments);
        Ok(shipments)
    }

    /// Confirm shipment of an order item
    pub async fn create(&self, request: &ShipmentRequest) -> Result<Record> {
        request.validate()?;
        let response = self
            .group
            .send_document(
                Method::POST,
                "",
                "ShipmentRequest",
                &EncoderConfig::plaza(),
                &request.to_fields(),
            )
            .await?;
        record_from(&models::PROCESS_STATUS, &response)
    }
}

impl Transports<'_> {
    /// Change the carrier or track-and-trace code of a transport
    pub async fn update(
        &self,
        transport_id: &str,
        transporter: TransporterCode,
        track_and_trace: &str,
    ) -> Result<Record> {
        let fields = xml_fields! {
            "TransporterCode" => transporter,
            "TrackAndTrace" => track_and_trace,
        };
        let response = self
            .group
            .send_document(
                Method::PUT,
                &format!("/{transport_id}"),
                "ChangeTransportRequest",
                &EncoderConfig::plaza(),
                &fields,
            )
            .await?;
        record_from(&models::PROCESS_STATUS, &response)
    }

    /// PDF of a purchased shipping label
    pub async fn shipping_label(&self, transport_id: &str, label_id: &str) -> Result<Bytes> {
        let response = self
            .group
            .send(
                Method::GET,
                &format!("/{transport_id}/shipping-label/{label_id}"),
                RequestConfig::new().accept(ACCEPT_PDF),
            )
            .await?;
        Ok(response.into_bytes())
    }
}

impl Labels<'_> {
    /// Labels that can be bought for an order item
    pub async fn get(&self, order_item_id: &str) -> Result<RecordList> {
        let config = RequestConfig::new().query("orderItemId", order_item_id);
        let labels = self
            .group
            .get_list(&models::PURCHASABLE_SHIPPING_LABELS, "", config)
            .await?;
        log_count("labels.get", &labels);
        Ok(labels)
    }
}

// ============================================================================
// Returns
// ============================================================================

impl ReturnItems<'_> {
    pub async fn unhandled(&self) -> Result<RecordList> {
        let items = self
            .group
            .get_list(&models::RETURN_ITEMS, "/unhandled", RequestConfig::new())
            .await?;
        log_count("return_items.unhandled", &items);
        Ok(items)
    }

    /// Mark a return as handled
    pub async fn handle(&self, return_number: &str, reason: &str, quantity: u32) -> Result<Record> {
        let fields = xml_fields! {
            "StatusReason" => reason,
            "QuantityReturned" => quantity,
        };
        let response = self
            .group
            .send_document(
                Method::PUT,
                &format!("/{return_number}/handle"),
                "ReturnItemStatusUpdate",
                &EncoderConfig::plaza(),
                &fields,
            )
            .await?;
        record_from(&models::PROCESS_STATUS, &response)
    }
}

// ============================================================================
// Offers
// ============================================================================

impl Offers<'_> {
    /// Create or update offers; `true` when the API accepted the batch
    pub async fn upsert(&self, offers: Vec<XmlFields>) -> Result<bool> {
        if offers.is_empty() {
            return Err(Error::invalid_argument("offers", "at least one offer is required"));
        }
        let fields = xml_fields! { "RetailerOffer" => offers };
        let response = self
            .group
            .send_document(
                Method::PUT,
                "/",
                "UpsertRequest",
                &EncoderConfig::offers(),
                &fields,
            )
            .await?;
        Ok(response.status() == 202)
    }

    /// Delete offers by identifier (`EAN` and `Condition`)
    pub async fn delete(&self, identifiers: &[XmlFields]) -> Result<bool> {
        if identifiers.is_empty() {
            return Err(Error::invalid_argument(
                "identifiers",
                "at least one offer identifier is required",
            ));
        }
        let fields = xml_fields! {
            "RetailerOfferIdentifier" => XmlValue::from(identifiers.to_vec()),
        };
        let response = self
            .group
            .send_document(
                Method::DELETE,
                "/",
                "DeleteBulkRequest",
                &EncoderConfig::offers(),
                &fields,
            )
            .await?;
        Ok(response.status() == 202)
    }

    pub async fn get(&self, ean: &str) -> Result<Record> {
        self.group
            .get_record(&models::OFFERS_RESPONSE, &format!("/{ean}"), RequestConfig::new())
            .await
    }

    /// Request an offer export; the record carries the file URL
    pub async fn export_file_name(&self) -> Result<Record> {
        self.group
            .get_record(&models::OFFER_FILE, "/export/", RequestConfig::new())
            .await
    }

    /// Download an offer export as CSV text
    pub async fn export_file(&self, url: &str) -> Result<String> {
        let marker = format!("/{}/", self.group.version());
        let (_, rest) = url.split_once(&marker).ok_or_else(|| {
            Error::invalid_argument("url", format!("'{url}' does not contain '{marker}'"))
        })?;

        let response = self
            .group
            .send(
                Method::GET,
                &format!("/{rest}"),
                RequestConfig::new().accept(ACCEPT_CSV),
            )
            .await?;
        response.text()
    }
}

// ============================================================================
// Inbounds and inventory
// ============================================================================

impl Inbounds<'_> {
    pub async fn list(&self, page: Option<u32>) -> Result<RecordList> {
        let config = RequestConfig::new().query_opt("page", page);
        let inbounds = self.group.get_list(&models::INBOUNDS, "", config).await?;
        log_count("inbounds.list", &inbounds);
        Ok(inbounds)
    }

    pub async fn get(&self, inbound_id: u64) -> Result<Record> {
        self.group
            .get_record(&models::INBOUND, &format!("/{inbound_id}"), RequestConfig::new())
            .await
    }

    /// Time slots available for delivering `items_to_send` items on a date
    pub async fn delivery_windows(
        &self,
        delivery_date: NaiveDate,
        items_to_send: u32,
    ) -> Result<RecordList> {
        let config = RequestConfig::new()
            .query("delivery-date", delivery_date.format("%Y-%m-%d"))
            .query("items-to-send", items_to_send);
        let windows = self
            .group
            .get_list(&models::DELIVERY_WINDOWS, "/delivery-windows", config)
            .await?;
        log_count("inbounds.delivery_windows", &windows);
        Ok(windows)
    }

    /// Announce an inbound shipment to the warehouse
    pub async fn create(&self, request: &InboundRequest) -> Result<Record> {
        request.validate()?;
        let response = self
            .group
            .send_document(
                Method::POST,
                "",
                "InboundRequest",
                &EncoderConfig::inbound(),
                &request.to_fields(),
            )
            .await?;
        record_from(&models::PROCESS_STATUS, &response)
    }

    pub async fn shipping_label(&self, inbound_id: u64) -> Result<Bytes> {
        self.pdf(&format!("/{inbound_id}/shippinglabel")).await
    }

    pub async fn packing_list(&self, inbound_id: u64) -> Result<Bytes> {
        self.pdf(&format!("/{inbound_id}/packinglistdetails")).await
    }

    async fn pdf(&self, path: &str) -> Result<Bytes> {
        let response = self
            .group
            .send(Method::GET, path, RequestConfig::new().accept(ACCEPT_PDF))
            .await?;
        Ok(response.into_bytes())
    }
}

impl Inventory<'_> {
    pub async fn list(&self, query: &InventoryQuery) -> Result<Record> {
        query.validate()?;
        let config = RequestConfig::new()
            .query_opt("page", query.page)
            .query_opt("quantity", query.quantity.as_deref())
            .query_opt("stock", query.stock.as_deref())
            .query_opt("state", query.state.as_deref())
            .query_opt("query", query.query.as_deref());

        self.group
            .get_record(&models::INVENTORY_RESPONSE, "", config)
            .await
    }
}
