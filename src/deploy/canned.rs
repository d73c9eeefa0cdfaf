//! Hand-written handlers that actually get deployed.
//!
//! LLM output is never shipped. Each [`ApiKind`] maps to one fixed Vercel
//! function ([`handler_source`]) and to [`respond`], which implements the
//! same request/response contract natively so it can be served as a preview
//! and tested without a JavaScript runtime. Keep the two in lockstep.

use serde_json::{Number, Value, json};

use crate::classify::ApiKind;

const SQUARE_JS: &str = r#"
module.exports = async (req, res) => {
  res.setHeader('Access-Control-Allow-Origin', '*');
  if (req.method === 'OPTIONS') return res.status(200).end();

  const { number } = req.body || {};
  if (typeof number !== 'number') {
    return res.status(400).json({ error: 'Number is required' });
  }
  return res.json({ number, square: number * number });
};
"#;

const AUTH_JS: &str = r#"
module.exports = async (req, res) => {
  res.setHeader('Access-Control-Allow-Origin', '*');
  if (req.method === 'OPTIONS') return res.status(200).end();

  const { email, password } = req.body || {};
  if (!email || !password) {
    return res.status(400).json({ error: 'Email and password required' });
  }
  return res.json({ success: true, token: 'mock-token' });
};
"#;

const CALCULATOR_JS: &str = r#"
module.exports = async (req, res) => {
  res.setHeader('Access-Control-Allow-Origin', '*');
  if (req.method === 'OPTIONS') return res.status(200).end();

  const { operation, a, b } = req.body || {};
  if (!['add', 'subtract', 'multiply', 'divide'].includes(operation)) {
    return res.status(400).json({ error: 'Invalid operation' });
  }
  if (typeof a !== 'number' || typeof b !== 'number') {
    return res.status(400).json({ error: 'Operands a and b must be numbers' });
  }
  let result;
  switch (operation) {
    case 'add': result = a + b; break;
    case 'subtract': result = a - b; break;
    case 'multiply': result = a * b; break;
    case 'divide': result = b !== 0 ? a / b : null; break;
  }
  return res.json({ operation, result });
};
"#;

const GENERIC_JS: &str = r#"
module.exports = async (req, res) => {
  res.setHeader('Access-Control-Allow-Origin', '*');
  if (req.method === 'OPTIONS') return res.status(200).end();

  return res.json({ message: 'API is working', method: req.method });
};
"#;

/// Source of `api/index.js` for a kind.
pub fn handler_source(kind: ApiKind) -> &'static str {
    match kind {
        ApiKind::Square => SQUARE_JS,
        ApiKind::Auth => AUTH_JS,
        ApiKind::Calculator => CALCULATOR_JS,
        ApiKind::Generic => GENERIC_JS,
    }
}

pub const MOCK_TOKEN: &str = "mock-token";

/// What a canned handler answers. `body == None` is an empty body.
#[derive(Debug, Clone, PartialEq)]
pub struct CannedResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl CannedResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: 400,
            body: Some(json!({ "error": message })),
        }
    }

    fn empty() -> Self {
        Self {
            status: 200,
            body: None,
        }
    }
}

/// Evaluates the canned handler for `kind` against one request.
///
/// `method` is the upper-case HTTP method; `body` is the parsed JSON body, if any.
pub fn respond(kind: ApiKind, method: &str, body: Option<&Value>) -> CannedResponse {
    if method.eq_ignore_ascii_case("OPTIONS") {
        return CannedResponse::empty();
    }
    let field = |name: &str| body.and_then(|b| b.get(name));

    match kind {
        ApiKind::Square => match field("number") {
            Some(Value::Number(n)) => CannedResponse::ok(json!({
                "number": n,
                "square": multiply(n, n),
            })),
            _ => CannedResponse::bad_request("Number is required"),
        },
        ApiKind::Auth => {
            if is_truthy(field("email")) && is_truthy(field("password")) {
                CannedResponse::ok(json!({ "success": true, "token": MOCK_TOKEN }))
            } else {
                CannedResponse::bad_request("Email and password required")
            }
        }
        ApiKind::Calculator => calculate(field("operation"), field("a"), field("b")),
        ApiKind::Generic => CannedResponse::ok(json!({
            "message": "API is working",
            "method": method.to_ascii_uppercase(),
        })),
    }
}

fn calculate(operation: Option<&Value>, a: Option<&Value>, b: Option<&Value>) -> CannedResponse {
    let op = match operation.and_then(Value::as_str) {
        Some(op @ ("add" | "subtract" | "multiply" | "divide")) => op,
        _ => return CannedResponse::bad_request("Invalid operation"),
    };
    let (Some(Value::Number(a)), Some(Value::Number(b))) = (a, b) else {
        return CannedResponse::bad_request("Operands a and b must be numbers");
    };

    let result = match op {
        "add" => arith(a, b, i64::checked_add, |x, y| x + y),
        "subtract" => arith(a, b, i64::checked_sub, |x, y| x - y),
        "multiply" => multiply(a, b),
        _ => divide(a, b),
    };
    CannedResponse::ok(json!({ "operation": op, "result": result }))
}

/// JavaScript truthiness of an optional JSON value.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Integer math when both sides are integers and nothing overflows, float math otherwise.
fn arith(
    a: &Number,
    b: &Number,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Value {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(r) = int_op(x, y) {
            return Value::from(r);
        }
    }
    float_value(float_op(as_f64(a), as_f64(b)))
}

fn multiply(a: &Number, b: &Number) -> Value {
    arith(a, b, i64::checked_mul, |x, y| x * y)
}

fn divide(a: &Number, b: &Number) -> Value {
    if as_f64(b) == 0.0 {
        return Value::Null;
    }
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if x.checked_rem(y) == Some(0) {
            if let Some(q) = x.checked_div(y) {
                return Value::from(q);
            }
        }
    }
    float_value(as_f64(a) / as_f64(b))
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// JSON has no NaN/Infinity; `JSON.stringify` writes those as null too.
fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(kind: ApiKind, body: Value) -> CannedResponse {
        respond(kind, "POST", Some(&body))
    }

    #[test]
    fn square_of_five() {
        let res = post(ApiKind::Square, json!({"number": 5}));
        assert_eq!(res.status, 200);
        assert_eq!(res.body, Some(json!({"number": 5, "square": 25})));
    }

    #[test]
    fn square_of_fraction_is_float() {
        let res = post(ApiKind::Square, json!({"number": 1.5}));
        assert_eq!(res.body, Some(json!({"number": 1.5, "square": 2.25})));
    }

    #[test]
    fn square_rejects_non_numbers() {
        for body in [json!({"number": "5"}), json!({}), json!({"number": null})] {
            let res = post(ApiKind::Square, body);
            assert_eq!(res.status, 400);
            assert_eq!(res.body, Some(json!({"error": "Number is required"})));
        }
        assert_eq!(respond(ApiKind::Square, "POST", None).status, 400);
    }

    #[test]
    fn auth_requires_both_fields() {
        let res = post(
            ApiKind::Auth,
            json!({"email": "user@example.com", "password": "123456"}),
        );
        assert_eq!(res.status, 200);
        assert_eq!(res.body, Some(json!({"success": true, "token": "mock-token"})));

        assert_eq!(post(ApiKind::Auth, json!({"email": "user@example.com"})).status, 400);
        assert_eq!(
            post(ApiKind::Auth, json!({"email": "", "password": "x"})).status,
            400
        );
    }

    #[test]
    fn calculator_operations() {
        let res = post(
            ApiKind::Calculator,
            json!({"operation": "multiply", "a": 8, "b": 9}),
        );
        assert_eq!(res.body, Some(json!({"operation": "multiply", "result": 72})));

        let res = post(ApiKind::Calculator, json!({"operation": "add", "a": 10, "b": 5}));
        assert_eq!(res.body, Some(json!({"operation": "add", "result": 15})));

        let res = post(ApiKind::Calculator, json!({"operation": "subtract", "a": 1, "b": 2.5}));
        assert_eq!(res.body, Some(json!({"operation": "subtract", "result": -1.5})));

        let res = post(ApiKind::Calculator, json!({"operation": "divide", "a": 6, "b": 3}));
        assert_eq!(res.body, Some(json!({"operation": "divide", "result": 2})));

        let res = post(ApiKind::Calculator, json!({"operation": "divide", "a": 5, "b": 2}));
        assert_eq!(res.body, Some(json!({"operation": "divide", "result": 2.5})));
    }

    #[test]
    fn divide_by_zero_is_null_not_error() {
        let res = post(ApiKind::Calculator, json!({"operation": "divide", "a": 5, "b": 0}));
        assert_eq!(res.status, 200);
        assert_eq!(res.body, Some(json!({"operation": "divide", "result": null})));
    }

    #[test]
    fn calculator_rejects_bad_input() {
        let res = post(ApiKind::Calculator, json!({"operation": "modulo", "a": 5, "b": 2}));
        assert_eq!(res.status, 400);
        assert_eq!(res.body, Some(json!({"error": "Invalid operation"})));

        let res = post(ApiKind::Calculator, json!({"operation": "add", "a": "5", "b": 2}));
        assert_eq!(res.status, 400);
    }

    #[test]
    fn overflow_falls_back_to_float() {
        let res = post(
            ApiKind::Calculator,
            json!({"operation": "multiply", "a": i64::MAX, "b": 2}),
        );
        let result = res.body.unwrap()["result"].as_f64().unwrap();
        assert!(result > 1.8e19);
    }

    #[test]
    fn generic_echoes_method() {
        let res = respond(ApiKind::Generic, "POST", None);
        assert_eq!(
            res.body,
            Some(json!({"message": "API is working", "method": "POST"}))
        );
        let res = respond(ApiKind::Generic, "get", None);
        assert_eq!(res.body.unwrap()["method"], "GET");
    }

    #[test]
    fn options_is_empty_200_everywhere() {
        for kind in ApiKind::ALL {
            let res = respond(kind, "OPTIONS", Some(&json!({"number": "x"})));
            assert_eq!(res, CannedResponse { status: 200, body: None });
        }
    }

    #[test]
    fn every_handler_answers_preflight() {
        for kind in ApiKind::ALL {
            let src = handler_source(kind);
            assert!(src.contains("req.method === 'OPTIONS'"), "{kind}");
            assert!(src.contains("module.exports"), "{kind}");
        }
        assert!(handler_source(ApiKind::Calculator).contains("b !== 0 ? a / b : null"));
        assert!(handler_source(ApiKind::Auth).contains(MOCK_TOKEN));
    }
}
