//! Request handling for one converter session
//!
//! Each request is a JSON-RPC style object. Form edits mutate the session's
//! form and answer with the new form state.

use iconvert_units::{
    convert, parse_quantity, Category, ConversionError, ConverterForm, UnitScale, UNITS,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const CONVERSION_ERROR: i32 = -32000;

#[derive(Debug, Deserialize)]
pub struct Request {
    /// `None` only when the field is absent; `"id": null` is `Some(Null)`
    #[serde(default, deserialize_with = "present")]
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

// Called only when the field is present, so null stays distinguishable
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<JsonValue>, D::Error> {
    JsonValue::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct Response {
    jsonrpc: &'static str,
    id: JsonValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl Response {
    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        Response {
            jsonrpc: "2.0",
            id: JsonValue::Null,
            result: None,
            error: Some(RpcError::new(PARSE_ERROR, format!("Parse error: {}", details))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        RpcError { code, message: message.into(), data: None }
    }
}

impl From<ConversionError> for RpcError {
    fn from(err: ConversionError) -> Self {
        RpcError {
            code: CONVERSION_ERROR,
            message: err.to_string(),
            data: Some(json!({
                "code": err.code(),
                "suggestion": err.suggestion(),
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    value: f64,
    category: String,
    from: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct ParseParams {
    text: String,
    to: String,
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
    category: String,
}

#[derive(Debug, Deserialize)]
struct ValueParams {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct UnitParams {
    unit: String,
}

/// One interactive converter form plus its request dispatch
pub struct Session {
    form: ConverterForm,
}

impl Session {
    pub fn new(category: Category) -> Self {
        Session { form: ConverterForm::new(category) }
    }

    /// Handle one protocol line. Blank lines and notifications (requests
    /// without an `id` field) produce no response.
    pub fn handle_line(&mut self, line: &str) -> Option<Response> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: Request = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!("error parsing request: {}", e);
                return Some(Response::parse_error(e));
            }
        };

        let response = self.handle(&request);
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    pub fn handle(&mut self, request: &Request) -> Response {
        let result = self.dispatch(request);
        if let Err(ref e) = result {
            warn!(method = %request.method, code = e.code, "{}", e.message);
        }

        let (result, error) = match result {
            Ok(r) => (Some(r), None),
            Err(e) => (None, Some(e)),
        };
        let id = request.id.clone().unwrap_or(JsonValue::Null);
        Response { jsonrpc: "2.0", id, result, error }
    }

    fn dispatch(&mut self, request: &Request) -> Result<JsonValue, RpcError> {
        debug!(method = %request.method, "dispatching");
        let params = request.params.clone().unwrap_or(JsonValue::Null);

        match request.method.as_str() {
            "ping" => Ok(json!({})),
            "categories" => Ok(categories()),
            "convert" => {
                let p: ConvertParams = params_as(params)?;
                let value = convert(p.value, &p.category, &p.from, &p.to)?;
                Ok(json!({ "value": value }))
            }
            "parse" => {
                let p: ParseParams = params_as(params)?;
                let quantity = parse_quantity(&p.text)?;
                let target = UNITS.lookup(quantity.category(), &p.to)?;
                let converted = quantity.convert_to(target)?;
                Ok(json!({
                    "category": converted.category(),
                    "value": converted.value,
                    "unit": converted.unit.symbol(),
                    "text": converted.to_string(),
                }))
            }
            "state" => self.state(),
            "select_category" => {
                let p: CategoryParams = params_as(params)?;
                self.form.select_category_named(&p.category)?;
                self.state()
            }
            "set_input" => {
                let p: ValueParams = params_as(params)?;
                self.form.set_input_value(p.value);
                self.state()
            }
            "set_output" => {
                let p: ValueParams = params_as(params)?;
                self.form.set_output_value(p.value);
                self.state()
            }
            "set_input_unit" => {
                let p: UnitParams = params_as(params)?;
                self.form.set_input_unit(&p.unit)?;
                self.state()
            }
            "set_output_unit" => {
                let p: UnitParams = params_as(params)?;
                self.form.set_output_unit(&p.unit)?;
                self.state()
            }
            _ => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        }
    }

    fn state(&self) -> Result<JsonValue, RpcError> {
        let state = self.form.state();
        Ok(json!({
            "category": state.category,
            "input": { "value": state.input_value, "unit": state.input_unit.symbol() },
            "output": { "value": state.output_value, "unit": state.output_unit.symbol() },
            "units": self.form.unit_choices(),
        }))
    }
}

fn params_as<T: for<'de> Deserialize<'de>>(params: JsonValue) -> Result<T, RpcError> {
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn categories() -> JsonValue {
    let list: Vec<JsonValue> = UNITS
        .categories()
        .iter()
        .map(|&category| {
            let defaults = UNITS.defaults(category);
            let units: Vec<JsonValue> = UNITS
                .units(category)
                .iter()
                .map(|u| json!({ "symbol": u.symbol(), "name": u.name(), "factor": u.to_base_factor() }))
                .collect();
            json!({
                "name": category.name(),
                "base": category.base_symbol(),
                "defaults": { "input": defaults.input.symbol(), "output": defaults.output.symbol() },
                "units": units,
            })
        })
        .collect();
    JsonValue::Array(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(method: &str, params: JsonValue) -> Request {
        Request { id: Some(json!(1)), method: method.to_string(), params: Some(params) }
    }

    fn call(session: &mut Session, method: &str, params: JsonValue) -> JsonValue {
        serde_json::to_value(session.handle(&request(method, params))).unwrap()
    }

    #[test]
    fn test_convert() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "convert", json!({"value": 1, "category": "Distance", "from": "km", "to": "m"}));
        assert_eq!(resp["id"], json!(1));
        assert_eq!(resp["result"]["value"], json!(1000.0));
    }

    #[test]
    fn test_convert_unknown_unit() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "convert", json!({"value": 1, "category": "Mass", "from": "km", "to": "lb"}));
        assert_eq!(resp["error"]["code"], json!(CONVERSION_ERROR));
        assert_eq!(resp["error"]["data"]["code"], json!("UNKNOWN_UNIT"));
        assert!(resp.get("result").is_none());
    }

    #[test]
    fn test_invalid_params() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "set_input", json!({"value": "ten"}));
        assert_eq!(resp["error"]["code"], json!(INVALID_PARAMS));
    }

    #[test]
    fn test_unknown_method() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "explode", json!({}));
        assert_eq!(resp["error"]["code"], json!(METHOD_NOT_FOUND));
    }

    #[test]
    fn test_form_flow() {
        let mut session = Session::new(Category::Distance);

        let resp = call(&mut session, "set_input", json!({"value": 2}));
        assert_eq!(resp["result"]["output"]["value"], json!(2000.0));

        let resp = call(&mut session, "select_category", json!({"category": "Mass"}));
        assert_eq!(resp["result"]["category"], json!("Mass"));
        assert_eq!(resp["result"]["input"]["unit"], json!("kg"));
        assert_eq!(resp["result"]["output"]["unit"], json!("lb"));
        assert_eq!(resp["result"]["units"], json!(["g", "kg", "lb"]));

        let resp = call(&mut session, "set_input_unit", json!({"unit": "g"}));
        assert_eq!(resp["result"]["input"]["unit"], json!("g"));

        let resp = call(&mut session, "set_output_unit", json!({"unit": "km"}));
        assert_eq!(resp["error"]["data"]["code"], json!("UNKNOWN_UNIT"));
    }

    #[test]
    fn test_parse() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "parse", json!({"text": "250 cm", "to": "m"}));
        assert_eq!(resp["result"]["value"], json!(2.5));
        assert_eq!(resp["result"]["text"], json!("2.5 m"));
    }

    fn line(session: &mut Session, text: &str) -> Option<JsonValue> {
        session.handle_line(text).map(|r| serde_json::to_value(r).unwrap())
    }

    #[test]
    fn test_notification_has_no_response() {
        let mut session = Session::new(Category::Distance);
        assert!(line(&mut session, r#"{"method":"set_input","params":{"value":3}}"#).is_none());

        // Still applied to the form
        let resp = line(&mut session, r#"{"id":7,"method":"state"}"#).unwrap();
        assert_eq!(resp["id"], json!(7));
        assert_eq!(resp["result"]["output"]["value"], json!(3000.0));
    }

    #[test]
    fn test_null_id_gets_response() {
        let mut session = Session::new(Category::Distance);
        let resp = line(&mut session, r#"{"id":null,"method":"ping"}"#).unwrap();
        assert_eq!(resp.get("id"), Some(&JsonValue::Null));
        assert_eq!(resp["result"], json!({}));
    }

    #[test]
    fn test_malformed_line() {
        let mut session = Session::new(Category::Distance);
        let resp = line(&mut session, "{not json").unwrap();
        assert_eq!(resp["error"]["code"], json!(PARSE_ERROR));
        assert_eq!(resp.get("id"), Some(&JsonValue::Null));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut session = Session::new(Category::Distance);
        assert!(line(&mut session, "").is_none());
        assert!(line(&mut session, "   \t").is_none());
    }

    #[test]
    fn test_parse_reports_format_errors() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "parse", json!({"text": "1,5 km", "to": "m"}));
        assert_eq!(resp["error"]["data"]["code"], json!("PARSE_ERROR"));
    }

    #[test]
    fn test_categories() {
        let mut session = Session::new(Category::Distance);
        let resp = call(&mut session, "categories", JsonValue::Null);
        let list = resp["result"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["defaults"], json!({"input": "km", "output": "m"}));
        assert_eq!(list[1]["base"], json!("kg"));
    }
}
