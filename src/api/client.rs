//! Plaza API entry point
//!
//! [`PlazaApi`] owns the signed transport and hands out one façade per
//! resource group. Every façade goes through a [`ResourceGroup`], which
//! builds the group URI, sends the request and decodes the answer.

use super::resources::{
    Inbounds, Inventory, Invoices, Labels, Offers, Orders, ProcessStatuses, ReturnItems,
    Shipments, Transports,
};
use crate::auth::Authenticator;
use crate::config::ClientConfig;
use crate::decode::{decode_list, decode_record, Payload, Record, RecordList, Schema};
use crate::encode::{encode, EncoderConfig, XmlFields};
use crate::error::Result;
use crate::http::{HttpClient, HttpResponse, RequestConfig};
use crate::types::Method;
use tracing::debug;

/// Client for the Plaza seller API
#[derive(Debug)]
pub struct PlazaApi {
    http: HttpClient,
    version: String,
}

impl PlazaApi {
    /// Build a signed client from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_auth(
            config.http_config(),
            Authenticator::new(config.credentials()),
        )?;
        Ok(Self::with_http_client(http, config.api_version))
    }

    /// Wrap an already configured transport
    pub fn with_http_client(http: HttpClient, version: impl Into<String>) -> Self {
        Self {
            http,
            version: version.into(),
        }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// API version used in versioned URIs
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn orders(&self) -> Orders<'_> {
        Orders::new(ResourceGroup::versioned(self, "orders"))
    }

    pub fn invoices(&self) -> Invoices<'_> {
        Invoices::new(ResourceGroup::versioned(self, "invoices"))
    }

    pub fn process_status(&self) -> ProcessStatuses<'_> {
        ProcessStatuses::new(ResourceGroup::versioned(self, "process-status"))
    }

    pub fn shipments(&self) -> Shipments<'_> {
        Shipments::new(ResourceGroup::versioned(self, "shipments"))
    }

    pub fn transports(&self) -> Transports<'_> {
        Transports::new(ResourceGroup::versioned(self, "transports"))
    }

    pub fn labels(&self) -> Labels<'_> {
        Labels::new(ResourceGroup::versioned(self, "purchasable-shipping-labels"))
    }

    pub fn return_items(&self) -> ReturnItems<'_> {
        ReturnItems::new(ResourceGroup::versioned(self, "return-items"))
    }

    pub fn offers(&self) -> Offers<'_> {
        Offers::new(ResourceGroup::offers(self))
    }

    pub fn inbounds(&self) -> Inbounds<'_> {
        Inbounds::new(ResourceGroup::unversioned(self, "inbounds"))
    }

    pub fn inventory(&self) -> Inventory<'_> {
        Inventory::new(ResourceGroup::unversioned(self, "inventory"))
    }
}

// ============================================================================
// Resource groups
// ============================================================================

/// URI prefix of one resource group plus the transport it talks through
#[derive(Debug, Clone)]
pub struct ResourceGroup<'a> {
    api: &'a PlazaApi,
    prefix: String,
}

impl<'a> ResourceGroup<'a> {
    /// `/services/rest/{group}/{version}`
    pub fn versioned(api: &'a PlazaApi, group: &str) -> Self {
        Self {
            prefix: format!("/services/rest/{group}/{}", api.version),
            api,
        }
    }

    /// `/services/rest/{group}`
    pub fn unversioned(api: &'a PlazaApi, group: &str) -> Self {
        Self {
            prefix: format!("/services/rest/{group}"),
            api,
        }
    }

    /// `/offers/{version}`
    pub fn offers(api: &'a PlazaApi) -> Self {
        Self {
            prefix: format!("/offers/{}", api.version),
            api,
        }
    }

    pub fn version(&self) -> &str {
        self.api.version()
    }

    /// Full URI of a path inside the group
    pub fn uri(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    /// Send a request to a path inside the group
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<HttpResponse> {
        let uri = self.uri(path);
        debug!(%method, uri = %uri, "plaza request");
        self.api.http.request(method, &uri, config).await
    }

    /// Encode a request document and send it as the body
    pub async fn send_document(
        &self,
        method: Method,
        path: &str,
        root: &str,
        encoder: &EncoderConfig,
        fields: &XmlFields,
    ) -> Result<HttpResponse> {
        let xml = encode(root, encoder, fields)?;
        self.send(method, path, RequestConfig::new().xml(xml)).await
    }

    /// GET a path and decode a single record
    pub async fn get_record(
        &self,
        schema: &Schema,
        path: &str,
        config: RequestConfig,
    ) -> Result<Record> {
        let response = self.send(Method::GET, path, config).await?;
        record_from(schema, &response)
    }

    /// GET a path and decode a record list
    pub async fn get_list(
        &self,
        schema: &Schema,
        path: &str,
        config: RequestConfig,
    ) -> Result<RecordList> {
        let response = self.send(Method::GET, path, config).await?;
        list_from(schema, &response)
    }
}

/// Decode a response body as one record, picking the format by content type
pub fn record_from(schema: &Schema, response: &HttpResponse) -> Result<Record> {
    let text = response.text()?;
    decode_record(schema, payload_for(response, &text))
}

/// Decode a response body as a record list, picking the format by content type
pub fn list_from(schema: &Schema, response: &HttpResponse) -> Result<RecordList> {
    let text = response.text()?;
    decode_list(schema, payload_for(response, &text))
}

fn payload_for<'t>(response: &HttpResponse, text: &'t str) -> Payload<'t> {
    if response.is_json() {
        Payload::Json(text)
    } else {
        Payload::Xml(text)
    }
}
