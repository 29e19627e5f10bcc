use actix_web::{http::StatusCode, HttpResponse};
use serde_json::{json, Map, Value};

/// Builds a `{ "success": true, ... }` envelope from the fields of `payload`.
///
/// Non-object payloads are nested under `data`.
pub fn success_json(status: StatusCode, payload: Value) -> HttpResponse {
    let mut body = match payload {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    body.insert("success".to_string(), Value::Bool(true));

    HttpResponse::build(status).json(Value::Object(body))
}

pub fn ok(payload: Value) -> HttpResponse {
    success_json(StatusCode::OK, payload)
}

pub fn created(payload: Value) -> HttpResponse {
    success_json(StatusCode::CREATED, payload)
}

pub fn ok_message(message: impl std::fmt::Display) -> HttpResponse {
    ok(json!({ "message": message.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    fn body_of(response: HttpResponse) -> Value {
        let bytes = response
            .into_body()
            .try_into_bytes()
            .expect("json body is buffered");
        serde_json::from_slice(&bytes).expect("valid json")
    }

    #[test]
    fn object_payload_is_merged_into_envelope() {
        let response = ok(json!({ "count": 3 }));
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_of(response);
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
    }

    #[test]
    fn array_payload_is_nested_under_data() {
        let body = body_of(created(json!([1, 2])));
        assert_eq!(body["data"], json!([1, 2]));
        assert_eq!(body["success"], true);
    }

    #[test]
    fn message_response_carries_text() {
        let body = body_of(ok_message("Quiz deleted"));
        assert_eq!(body["message"], "Quiz deleted");
    }
}
