//! CLI runner - executes commands

use crate::api::{InventoryQuery, PlazaApi};
use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, ClientConfig, Environment};
use crate::decode::{decode, Payload};
use crate::encode::{encode, fields_from_json, EncoderConfig, Namespace};
use crate::error::{Error, Result, ResultExt};
use crate::models::{get_schema, list_schemas};
use crate::types::JsonValue;
use serde_json::json;
use std::fs;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Orders {
                page,
                fulfilment_method,
            } => {
                let api = self.api()?;
                let orders = api.orders().list(*page, *fulfilment_method).await?;
                self.output_message(&serde_json::to_value(&orders)?);
            }
            Commands::Shipments {
                page,
                fulfilment_method,
                order_id,
            } => {
                let api = self.api()?;
                let shipments = api
                    .shipments()
                    .list(*page, *fulfilment_method, order_id.as_deref())
                    .await?;
                self.output_message(&serde_json::to_value(&shipments)?);
            }
            Commands::ProcessStatus { id } => {
                let api = self.api()?;
                let status = api.process_status().get(id).await?;
                self.output_message(&serde_json::to_value(&status)?);
            }
            Commands::Returns => {
                let api = self.api()?;
                let items = api.return_items().unhandled().await?;
                self.output_message(&serde_json::to_value(&items)?);
            }
            Commands::Inventory {
                page,
                quantity,
                stock,
                state,
                query,
            } => {
                let api = self.api()?;
                let query = InventoryQuery {
                    page: *page,
                    quantity: quantity.clone(),
                    stock: stock.clone(),
                    state: state.clone(),
                    query: query.clone(),
                };
                let inventory = api.inventory().list(&query).await?;
                self.output_message(&serde_json::to_value(&inventory)?);
            }
            Commands::Encode {
                root,
                namespace,
                inbound,
                input,
            } => {
                let xml = encode_file(root, namespace, *inbound, input)?;
                print!("{xml}");
            }
            Commands::Decode { model, input } => {
                let decoded = decode_file(model, input)?;
                self.output_message(&decoded);
            }
            Commands::Models => {
                self.output_message(&json!({ "models": list_schemas() }));
            }
        }
        Ok(())
    }

    /// Configuration file if given, environment otherwise
    fn client_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::from_env()?,
        };

        if self.cli.test {
            return Ok(config.with_environment(Environment::Test));
        }
        Ok(config)
    }

    fn api(&self) -> Result<PlazaApi> {
        let config = self.client_config()?;
        debug!(base_url = config.resolved_base_url(), "using Plaza API");
        PlazaApi::new(config)
    }

    /// Output a message
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Encode the JSON request fields stored in `input`
pub fn encode_file(root: &str, namespace: &str, inbound: bool, input: &Path) -> Result<String> {
    let namespace: Namespace = namespace.parse()?;
    let config = if inbound {
        EncoderConfig::inbound()
    } else {
        EncoderConfig::plaza()
    };

    let json = serde_json::from_str(&read_input(input)?)
        .with_context(|| format!("'{}' is not valid JSON", input.display()))?;
    let fields = fields_from_json(json)?;
    encode(root, &config.with_namespace(namespace), &fields)
}

/// Decode a saved response body against a named model
///
/// Bodies starting with `<` are read as XML, anything else as JSON.
pub fn decode_file(model: &str, input: &Path) -> Result<JsonValue> {
    let schema = get_schema(model).ok_or_else(|| {
        Error::invalid_argument(
            "model",
            format!(
                "unknown model '{model}', expected one of: {}",
                list_schemas().join(", ")
            ),
        )
    })?;

    let body = read_input(input)?;
    let payload = if body.trim_start().starts_with('<') {
        Payload::Xml(&body)
    } else {
        Payload::Json(&body)
    };

    let decoded = decode(&schema, payload)?;
    Ok(serde_json::to_value(&decoded)?)
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_encode_file() {
        let file = temp_file(r#"{"TrackAndTrace": "3SAOLD1234567", "TransporterCode": "TNT"}"#);
        let xml = encode_file("ChangeTransportRequest", "v2", false, file.path()).unwrap();

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ChangeTransportRequest xmlns=\"https://plazaapi.bol.com/services/xsd/v2/plazaapi.xsd\">"));
        assert!(xml.contains("    <TransporterCode>TNT</TransporterCode>\n"));
    }

    #[test]
    fn test_encode_file_inbound_namespace() {
        let file = temp_file(r#"{"Products": [{"Product": {"EAN": "8710000000001", "AnnouncedQuantity": 3}}]}"#);
        let xml = encode_file("InboundRequest", "v1", true, file.path()).unwrap();

        assert!(xml.contains("services/xsd/v1/plazaapi.xsd"));
        assert!(xml.contains("<AnnouncedQuantity>3</AnnouncedQuantity>"));
        assert_eq!(xml.matches("<Products>").count(), 1);
    }

    #[test]
    fn test_encode_file_rejects_unknown_namespace() {
        let file = temp_file("{}");
        let err = encode_file("Root", "v9", false, file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_decode_file_xml() {
        let file = temp_file(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ProcessStatus xmlns="https://plazaapi.bol.com/services/xsd/v2/plazaapi.xsd">
    <id>1</id>
    <status>SUCCESS</status>
</ProcessStatus>"#,
        );
        let decoded = decode_file("process-status", file.path()).unwrap();
        assert_eq!(decoded, json!({"id": "1", "status": "SUCCESS"}));
    }

    #[test]
    fn test_decode_file_json_list() {
        let file = temp_file(r#"{"shipments": [{"shipmentId": 1}, {"shipmentId": 2}]}"#);
        let decoded = decode_file("shipments", file.path()).unwrap();
        assert_eq!(decoded.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_decode_file_unknown_model() {
        let file = temp_file("{}");
        let err = decode_file("nope", file.path()).unwrap_err();
        assert!(err.to_string().contains("process-status"));
    }

    #[test]
    fn test_missing_input_file() {
        let err = decode_file("orders", Path::new("/nonexistent/plaza.json")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
