//! Schema catalog
//!
//! One immutable [`Schema`] per resource shape. JSON bodies use camelCase
//! keys and XML documents PascalCase element names; orders and shipments are
//! served in both formats, so their schemas declare both spellings. Fields
//! not listed here are still decoded, as raw values.

use crate::decode::{FieldDecoder, Schema};
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

type SchemaRef = LazyLock<Arc<Schema>>;

fn plain(name: &str) -> Arc<Schema> {
    Schema::record(name).build()
}

fn list_of(name: &str, item: &Arc<Schema>) -> Arc<Schema> {
    Schema::list(name, item).build()
}

fn keyed_list(name: &str, item: &Arc<Schema>, key: &str) -> Arc<Schema> {
    Schema::list(name, item).collection_key(key).build()
}

/// List nested under a camelCase key in JSON and under repeated item
/// elements in XML
fn dual_list(name: &str, item: &Arc<Schema>, json_key: &str, xml_key: &str) -> Arc<Schema> {
    Schema::list(name, item)
        .collection_key(json_key)
        .collection_key(xml_key)
        .build()
}

// ============================================================================
// Orders
// ============================================================================

pub static BILLING_DETAILS: SchemaRef = LazyLock::new(|| plain("BillingDetails"));
pub static SHIPMENT_DETAILS: SchemaRef = LazyLock::new(|| plain("ShipmentDetails"));

pub static CUSTOMER_DETAILS: SchemaRef = LazyLock::new(|| {
    Schema::record("CustomerDetails")
        .field("shipmentDetails", FieldDecoder::nested(&SHIPMENT_DETAILS))
        .field("billingDetails", FieldDecoder::nested(&BILLING_DETAILS))
        .build()
});

pub static PICK_UP_POINT: SchemaRef = LazyLock::new(|| plain("PickUpPoint"));
pub static PICK_UP_POINTS: SchemaRef = LazyLock::new(|| list_of("PickUpPoints", &PICK_UP_POINT));

pub static FULFILMENT: SchemaRef = LazyLock::new(|| {
    Schema::record("Fulfilment")
        .field("latestDeliveryDate", FieldDecoder::Date)
        .field("expiryDate", FieldDecoder::Date)
        .field("exactDeliveryDate", FieldDecoder::Date)
        .field("pickUpPoints", FieldDecoder::nested(&PICK_UP_POINTS))
        .build()
});

pub static OFFER: SchemaRef = LazyLock::new(|| plain("Offer"));
pub static PRODUCT: SchemaRef = LazyLock::new(|| plain("Product"));

pub static ADDITIONAL_SERVICE: SchemaRef = LazyLock::new(|| plain("AdditionalService"));
pub static ADDITIONAL_SERVICES: SchemaRef =
    LazyLock::new(|| list_of("AdditionalServices", &ADDITIONAL_SERVICE));

/// JSON and XML spellings of an order line, in one schema
pub static ORDER_ITEM: SchemaRef = LazyLock::new(|| {
    Schema::record("OrderItem")
        .field("fulfilment", FieldDecoder::nested(&FULFILMENT))
        .field("offer", FieldDecoder::nested(&OFFER))
        .field("product", FieldDecoder::nested(&PRODUCT))
        .field("additionalServices", FieldDecoder::nested(&ADDITIONAL_SERVICES))
        .field("offerPrice", FieldDecoder::Decimal)
        .field("transactionFee", FieldDecoder::Decimal)
        .field("OfferPrice", FieldDecoder::Decimal)
        .field("TransactionFee", FieldDecoder::Decimal)
        .build()
});

/// A bare array in JSON, `<OrderItem>` elements in XML
pub static ORDER_ITEMS: SchemaRef =
    LazyLock::new(|| keyed_list("OrderItems", &ORDER_ITEM, "OrderItem"));

pub static ORDER: SchemaRef = LazyLock::new(|| {
    Schema::record("Order")
        .field("orderItems", FieldDecoder::nested(&ORDER_ITEMS))
        .field("orderPlacedDateTime", FieldDecoder::DateTime)
        .field("shipmentDetails", FieldDecoder::nested(&SHIPMENT_DETAILS))
        .field("billingDetails", FieldDecoder::nested(&BILLING_DETAILS))
        .field("OrderItems", FieldDecoder::nested(&ORDER_ITEMS))
        .field("OrderPlacedDateTime", FieldDecoder::DateTime)
        .field("OrderDate", FieldDecoder::DateTime)
        .field("CustomerDetails", FieldDecoder::nested(&CUSTOMER_DETAILS))
        .build()
});

pub static ORDERS: SchemaRef = LazyLock::new(|| dual_list("Orders", &ORDER, "orders", "Order"));

// ============================================================================
// Shipments
// ============================================================================

pub static SHIPMENT_ITEM: SchemaRef = LazyLock::new(|| {
    Schema::record("ShipmentItem")
        .field("orderDate", FieldDecoder::DateTime)
        .field("latestDeliveryDate", FieldDecoder::DateTime)
        .field("OrderDate", FieldDecoder::DateTime)
        .field("OfferPrice", FieldDecoder::Decimal)
        .build()
});

pub static SHIPMENT_ITEMS: SchemaRef =
    LazyLock::new(|| keyed_list("ShipmentItems", &SHIPMENT_ITEM, "ShipmentItem"));

pub static TRANSPORT: SchemaRef = LazyLock::new(|| plain("Transport"));

pub static SHIPMENT: SchemaRef = LazyLock::new(|| {
    Schema::record("Shipment")
        .field("shipmentDate", FieldDecoder::DateTime)
        .field("shipmentItems", FieldDecoder::nested(&SHIPMENT_ITEMS))
        .field("transport", FieldDecoder::nested(&TRANSPORT))
        .field("ShipmentDate", FieldDecoder::DateTime)
        .field("ShipmentItems", FieldDecoder::nested(&SHIPMENT_ITEMS))
        .field("Transport", FieldDecoder::nested(&TRANSPORT))
        .build()
});

pub static SHIPMENTS: SchemaRef =
    LazyLock::new(|| dual_list("Shipments", &SHIPMENT, "shipments", "Shipment"));

// ============================================================================
// Process status
// ============================================================================

pub static LINK: SchemaRef = LazyLock::new(|| plain("Link"));

/// `links` is an array in JSON and a `<links><link/></links>` wrapper in XML
pub static LINKS: SchemaRef = LazyLock::new(|| keyed_list("Links", &LINK, "link"));

pub static PROCESS_STATUS: SchemaRef = LazyLock::new(|| {
    Schema::record("ProcessStatus")
        .field("createTimestamp", FieldDecoder::DateTime)
        .field("links", FieldDecoder::nested(&LINKS))
        .build()
});

pub static PROCESS_STATUSES: SchemaRef = LazyLock::new(|| {
    dual_list(
        "ProcessStatuses",
        &PROCESS_STATUS,
        "processStatuses",
        "ProcessStatus",
    )
});

// ============================================================================
// Invoices
// ============================================================================

pub static INVOICE: SchemaRef = LazyLock::new(|| plain("Invoice"));
pub static INVOICES: SchemaRef =
    LazyLock::new(|| dual_list("Invoices", &INVOICE, "invoiceListItems", "InvoiceListItem"));

pub static INVOICE_SPECIFICATION_ITEM: SchemaRef =
    LazyLock::new(|| plain("InvoiceSpecificationItem"));
pub static INVOICE_SPECIFICATION: SchemaRef = LazyLock::new(|| {
    keyed_list(
        "InvoiceSpecification",
        &INVOICE_SPECIFICATION_ITEM,
        "invoiceSpecification",
    )
});

// ============================================================================
// Shipping labels
// ============================================================================

pub static SHIPPING_LABEL: SchemaRef = LazyLock::new(|| {
    Schema::record("ShippingLabel")
        .field("retailPrice", FieldDecoder::Decimal)
        .field("purchasePrice", FieldDecoder::Decimal)
        .field("discount", FieldDecoder::Decimal)
        .build()
});

pub static PURCHASABLE_SHIPPING_LABELS: SchemaRef = LazyLock::new(|| {
    dual_list(
        "PurchasableShippingLabels",
        &SHIPPING_LABEL,
        "purchasableShippingLabels",
        "PurchasableShippingLabel",
    )
});

// ============================================================================
// Offers
// ============================================================================

pub static VISIBLE: SchemaRef = LazyLock::new(|| plain("Visible"));
pub static VISIBLES: SchemaRef = LazyLock::new(|| list_of("Visibles", &VISIBLE));

pub static STORE: SchemaRef = LazyLock::new(|| {
    Schema::record("Store")
        .field("visible", FieldDecoder::nested(&VISIBLES))
        .build()
});

pub static STOCK: SchemaRef = LazyLock::new(|| plain("Stock"));
pub static CONDITION: SchemaRef = LazyLock::new(|| plain("Condition"));

pub static BUNDLE_PRICE: SchemaRef = LazyLock::new(|| {
    Schema::record("BundlePrice")
        .field("unitPrice", FieldDecoder::Decimal)
        .build()
});

pub static BUNDLE_PRICES: SchemaRef = LazyLock::new(|| list_of("BundlePrices", &BUNDLE_PRICE));

pub static PRICING: SchemaRef = LazyLock::new(|| {
    Schema::record("Pricing")
        .field("bundlePrices", FieldDecoder::nested(&BUNDLE_PRICES))
        .build()
});

pub static NOT_PUBLISHABLE_REASON: SchemaRef = LazyLock::new(|| plain("NotPublishableReason"));
pub static NOT_PUBLISHABLE_REASONS: SchemaRef =
    LazyLock::new(|| list_of("NotPublishableReasons", &NOT_PUBLISHABLE_REASON));

pub static OFFERS_RESPONSE: SchemaRef = LazyLock::new(|| {
    Schema::record("OffersResponse")
        .field("pricing", FieldDecoder::nested(&PRICING))
        .field("fulfilment", FieldDecoder::nested(&FULFILMENT))
        .field("store", FieldDecoder::nested(&STORE))
        .field("stock", FieldDecoder::nested(&STOCK))
        .field("condition", FieldDecoder::nested(&CONDITION))
        .field(
            "notPublishableReasons",
            FieldDecoder::nested(&NOT_PUBLISHABLE_REASONS),
        )
        .build()
});

/// Location of the offer export; the file itself is fetched separately
pub static OFFER_FILE: SchemaRef = LazyLock::new(|| plain("OfferFile"));

// ============================================================================
// Returns
// ============================================================================

pub static SINGLE_RETURN_ITEM: SchemaRef = LazyLock::new(|| {
    Schema::record("SingleReturnItem")
        .field("customerDetails", FieldDecoder::nested(&CUSTOMER_DETAILS))
        .build()
});

pub static RETURN_ITEM: SchemaRef = LazyLock::new(|| plain("ReturnItem"));
pub static RETURN_ITEMS: SchemaRef =
    LazyLock::new(|| dual_list("ReturnItems", &RETURN_ITEM, "returns", "Item"));

// ============================================================================
// Inbounds
// ============================================================================

pub static TIME_SLOT: SchemaRef = LazyLock::new(|| {
    Schema::record("TimeSlot")
        .field("Start", FieldDecoder::DateTime)
        .field("End", FieldDecoder::DateTime)
        .build()
});

pub static FBB_TRANSPORTER: SchemaRef = LazyLock::new(|| plain("FbbTransporter"));

pub static INBOUND_PRODUCT: SchemaRef = LazyLock::new(|| plain("InboundProduct"));
pub static INBOUND_PRODUCTS: SchemaRef =
    LazyLock::new(|| keyed_list("InboundProducts", &INBOUND_PRODUCT, "Product"));

pub static INBOUND_STATE: SchemaRef = LazyLock::new(|| {
    Schema::record("InboundState")
        .field("StateDate", FieldDecoder::DateTime)
        .build()
});

pub static STATE_TRANSITIONS: SchemaRef =
    LazyLock::new(|| keyed_list("StateTransitions", &INBOUND_STATE, "InboundState"));

pub static INBOUND: SchemaRef = LazyLock::new(|| {
    Schema::record("Inbound")
        .field("CreationDate", FieldDecoder::DateTime)
        .field("TimeSlot", FieldDecoder::nested(&TIME_SLOT))
        .field("FbbTransporter", FieldDecoder::nested(&FBB_TRANSPORTER))
        .field("Products", FieldDecoder::nested(&INBOUND_PRODUCTS))
        .field("StateTransitions", FieldDecoder::nested(&STATE_TRANSITIONS))
        .build()
});

/// Paged inbound listing; `TotalCount` and friends stay on the raw payload
pub static INBOUNDS: SchemaRef = LazyLock::new(|| keyed_list("Inbounds", &INBOUND, "Inbound"));

pub static DELIVERY_WINDOWS: SchemaRef =
    LazyLock::new(|| keyed_list("DeliveryWindows", &TIME_SLOT, "TimeSlot"));

// ============================================================================
// Inventory
// ============================================================================

pub static INVENTORY_OFFER: SchemaRef = LazyLock::new(|| plain("InventoryOffer"));
pub static INVENTORY_OFFERS: SchemaRef =
    LazyLock::new(|| keyed_list("InventoryOffers", &INVENTORY_OFFER, "Offer"));

pub static INVENTORY_RESPONSE: SchemaRef = LazyLock::new(|| {
    Schema::record("InventoryResponse")
        .field("Offers", FieldDecoder::nested(&INVENTORY_OFFERS))
        .build()
});

// ============================================================================
// Lookup
// ============================================================================

/// Top-level response schemas by command-line name
pub static CATALOG: LazyLock<BTreeMap<&'static str, Arc<Schema>>> = LazyLock::new(|| {
    let mut m = BTreeMap::new();

    m.insert("orders", ORDERS.clone());
    m.insert("order", ORDER.clone());
    m.insert("shipments", SHIPMENTS.clone());
    m.insert("shipment", SHIPMENT.clone());
    m.insert("process-status", PROCESS_STATUS.clone());
    m.insert("process-statuses", PROCESS_STATUSES.clone());
    m.insert("invoices", INVOICES.clone());
    m.insert("invoice", INVOICE.clone());
    m.insert("invoice-specification", INVOICE_SPECIFICATION.clone());
    m.insert("shipping-labels", PURCHASABLE_SHIPPING_LABELS.clone());
    m.insert("offer", OFFERS_RESPONSE.clone());
    m.insert("offer-file", OFFER_FILE.clone());
    m.insert("returns", RETURN_ITEMS.clone());
    m.insert("return-item", SINGLE_RETURN_ITEM.clone());
    m.insert("inbounds", INBOUNDS.clone());
    m.insert("inbound", INBOUND.clone());
    m.insert("delivery-windows", DELIVERY_WINDOWS.clone());
    m.insert("inventory", INVENTORY_RESPONSE.clone());

    m
});

/// Get a response schema by name
pub fn get_schema(name: &str) -> Option<Arc<Schema>> {
    CATALOG.get(name).cloned()
}

/// Names accepted by [`get_schema`]
pub fn list_schemas() -> Vec<&'static str> {
    CATALOG.keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{decode_list, decode_record, Payload};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_orders_property() {
        let body = r#"{"orders": [{"orderId": "1", "orderPlacedDateTime": "2021-01-01T10:00:00Z"}]}"#;
        let orders = decode_list(&ORDERS, Payload::Json(body)).unwrap();

        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.get("orderId").unwrap().as_str(), Some("1"));
        assert_eq!(
            order.get("orderPlacedDateTime").unwrap().as_datetime().unwrap(),
            &Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_order_item_fulfilment_dates() {
        let body = r#"{"orders": [{"orderItems": [{
            "offerPrice": 19.99,
            "fulfilment": {"latestDeliveryDate": "2021-01-15", "pickUpPoints": [{"code": "A"}]}
        }]}]}"#;
        let orders = decode_list(&ORDERS, Payload::Json(body)).unwrap();

        let item = &orders[0].get("orderItems").unwrap().as_list().unwrap()[0];
        assert_eq!(item.get("offerPrice").unwrap().as_decimal().unwrap().to_string(), "19.99");

        let fulfilment = item.get("fulfilment").unwrap().as_record().unwrap();
        assert_eq!(
            fulfilment.get("latestDeliveryDate").unwrap().as_date(),
            NaiveDate::from_ymd_opt(2021, 1, 15)
        );
        assert_eq!(fulfilment.get("pickUpPoints").unwrap().as_list().unwrap().len(), 1);
    }

    #[test]
    fn test_orders_xml_elements_are_typed() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<bns:Orders xmlns:bns="https://plazaapi.bol.com/services/xsd/v2.1/plazaapi.xsd">
    <bns:Order>
        <bns:OrderId>4123456789</bns:OrderId>
        <bns:OrderPlacedDateTime>2021-01-01T10:00:00Z</bns:OrderPlacedDateTime>
        <bns:OrderItems>
            <bns:OrderItem>
                <bns:OrderItemId>6107434013</bns:OrderItemId>
                <bns:OfferPrice>19.99</bns:OfferPrice>
                <bns:TransactionFee>1.20</bns:TransactionFee>
            </bns:OrderItem>
            <bns:OrderItem>
                <bns:OrderItemId>6107434014</bns:OrderItemId>
                <bns:OfferPrice>5</bns:OfferPrice>
            </bns:OrderItem>
        </bns:OrderItems>
    </bns:Order>
</bns:Orders>"#;

        let orders = decode_list(&ORDERS, Payload::Xml(xml)).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].get("OrderId").unwrap().as_str(), Some("4123456789"));

        let placed = orders[0].get("OrderPlacedDateTime").unwrap().as_datetime().unwrap();
        assert_eq!(placed.to_rfc3339(), "2021-01-01T10:00:00+00:00");

        let items = orders[0].get("OrderItems").unwrap().as_list().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0].get("OfferPrice").unwrap().as_decimal().map(|d| d.to_string()),
            Some("19.99".to_string())
        );
        assert_eq!(
            items[0].get("TransactionFee").unwrap().as_decimal().map(|d| d.to_string()),
            Some("1.20".to_string())
        );
    }

    #[test]
    fn test_single_xml_order_item_is_a_list() {
        let xml = "<Orders><Order><OrderItems><OrderItem><OfferPrice>3.50</OfferPrice></OrderItem></OrderItems></Order></Orders>";

        let orders = decode_list(&ORDERS, Payload::Xml(xml)).unwrap();
        let items = orders[0].get("OrderItems").unwrap().as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].get("OfferPrice").unwrap().as_decimal().is_some());
    }

    #[test]
    fn test_shipments_xml_elements_are_typed() {
        let xml = r#"<Shipments xmlns="https://plazaapi.bol.com/services/xsd/v2.1/plazaapi.xsd">
    <Shipment>
        <ShipmentId>541757635</ShipmentId>
        <ShipmentDate>2018-04-17T10:55:37.000+02:00</ShipmentDate>
        <ShipmentItems>
            <ShipmentItem>
                <OrderId>4123456789</OrderId>
                <OrderDate>2018-04-17T10:54:12.000+02:00</OrderDate>
                <OfferPrice>35.99</OfferPrice>
            </ShipmentItem>
        </ShipmentItems>
        <Transport><TransportId>312778947</TransportId></Transport>
    </Shipment>
</Shipments>"#;

        let shipments = decode_list(&SHIPMENTS, Payload::Xml(xml)).unwrap();
        assert_eq!(shipments.len(), 1);
        assert!(shipments[0].get("ShipmentDate").unwrap().as_datetime().is_some());
        assert!(shipments[0].get("Transport").unwrap().as_record().is_some());

        let items = shipments[0].get("ShipmentItems").unwrap().as_list().unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].get("OrderDate").unwrap().as_datetime().is_some());
        assert!(items[0].get("OfferPrice").unwrap().as_decimal().is_some());
    }

    #[test]
    fn test_missing_shipments_is_empty() {
        let shipments = decode_list(&SHIPMENTS, Payload::Json("{}")).unwrap();
        assert!(shipments.is_empty());
    }

    #[test]
    fn test_process_status_xml_links() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<ns1:ProcessStatus xmlns:ns1="https://plazaapi.bol.com/services/xsd/v2/plazaapi.xsd">
    <ns1:id>1</ns1:id>
    <ns1:eventType>CHANGE_TRANSPORT</ns1:eventType>
    <ns1:status>PENDING</ns1:status>
    <ns1:createTimestamp>2018-11-14T09:34:40.000+01:00</ns1:createTimestamp>
    <ns1:links>
        <ns1:link>
            <ns1:rel>self</ns1:rel>
            <ns1:href>https://plazaapi.bol.com/services/rest/process-status/v2/1</ns1:href>
        </ns1:link>
    </ns1:links>
</ns1:ProcessStatus>"#;

        let status = decode_record(&PROCESS_STATUS, Payload::Xml(xml)).unwrap();
        assert_eq!(status.get("status").unwrap().as_str(), Some("PENDING"));
        assert!(status.get("createTimestamp").unwrap().as_datetime().is_some());

        let links = status.get("links").unwrap().as_list().unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get("rel").unwrap().as_str(), Some("self"));
    }

    #[test]
    fn test_process_status_json_links() {
        let body = r#"{"id": 1, "createTimestamp": "2018-11-14T09:34:40+01:00", "links": [{"rel": "self"}, {"rel": "next"}]}"#;
        let status = decode_record(&PROCESS_STATUS, Payload::Json(body)).unwrap();
        assert_eq!(status.get("links").unwrap().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_shipping_label_prices() {
        let body = r#"{"purchasableShippingLabels": [{"retailPrice": 6.95, "purchasePrice": "5.10", "discount": 0}]}"#;
        let labels = decode_list(&PURCHASABLE_SHIPPING_LABELS, Payload::Json(body)).unwrap();

        let label = &labels[0];
        assert_eq!(
            label.get("purchasePrice").unwrap().as_decimal(),
            Some(Decimal::from_str("5.10").unwrap())
        );
        assert_eq!(label.get("discount").unwrap().as_decimal(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_inbounds_xml() {
        let xml = r#"<Inbounds xmlns="https://plazaapi.bol.com/services/xsd/v1/plazaapi.xsd">
    <TotalCount>2</TotalCount>
    <TotalPageCount>1</TotalPageCount>
    <Inbound>
        <Id>1124284930</Id>
        <Reference>FBB20180919</Reference>
        <CreationDate>2018-09-19T10:19:10+02:00</CreationDate>
        <TimeSlot>
            <Start>2018-09-26T08:00:00+02:00</Start>
            <End>2018-09-26T09:00:00+02:00</End>
        </TimeSlot>
        <FbbTransporter><Code>PostNL</Code><Name>PostNL</Name></FbbTransporter>
    </Inbound>
    <Inbound>
        <Id>1124284931</Id>
    </Inbound>
</Inbounds>"#;

        let inbounds = decode_list(&INBOUNDS, Payload::Xml(xml)).unwrap();
        assert_eq!(inbounds.len(), 2);
        assert_eq!(inbounds.raw_payload()["TotalCount"], "2");

        let slot = inbounds[0].get("TimeSlot").unwrap().as_record().unwrap();
        assert!(slot.get("Start").unwrap().as_datetime().is_some());
        assert_eq!(
            inbounds[0].get("FbbTransporter").unwrap().as_record().unwrap().get("Code").unwrap().as_str(),
            Some("PostNL")
        );
    }

    #[test]
    fn test_inventory_xml() {
        let xml = r#"<InventoryResponse xmlns="https://plazaapi.bol.com/services/xsd/v1/plazaapi.xsd">
    <TotalCount>1</TotalCount>
    <Offers>
        <Offer>
            <EAN>8718526069334</EAN>
            <Stock>10</Stock>
        </Offer>
    </Offers>
</InventoryResponse>"#;

        let inventory = decode_record(&INVENTORY_RESPONSE, Payload::Xml(xml)).unwrap();
        let offers = inventory.get("Offers").unwrap().as_list().unwrap();
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].get("EAN").unwrap().as_str(), Some("8718526069334"));
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(get_schema("orders").unwrap().name(), "Orders");
        assert!(get_schema("unknown").is_none());

        let names = list_schemas();
        assert!(names.contains(&"inbounds"));
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
