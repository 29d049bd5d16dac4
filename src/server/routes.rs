use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        (method, path) if method == "GET" && path.starts_with("/api/records") => {
            match api::records_payload(path) {
                Ok(payload) => json_ok(payload),
                Err(api::ApiError::Parse(err)) => {
                    error_response(400, "Bad Request", &format!("Invalid request: {err}"))
                }
                Err(api::ApiError::Validation(message)) => {
                    error_response(400, "Bad Request", &message)
                }
            }
        }
        ("POST", "/api/optimize") => match api::optimize_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::ApiError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::ApiError::Validation(message)) => {
                error_response(400, "Bad Request", &message)
            }
        },
        ("POST", "/api/validate") => match api::validate_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::ApiError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::ApiError::Validation(message)) => {
                error_response(400, "Bad Request", &message)
            }
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn json_ok(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    "<!doctype html>\n<html>\n<head><title>anchorleg</title></head>\n<body>\n\
     <h1>anchorleg relay allocator</h1>\n\
     <ul>\n\
     <li>GET /api/health</li>\n\
     <li>GET /api/records?gender=men|women</li>\n\
     <li>POST /api/optimize with { rankings, gender?, relays_per_swimmer?, tier_count?, school? }</li>\n\
     <li>POST /api/validate with { allocation, relays_per_swimmer? }</li>\n\
     </ul>\n</body>\n</html>\n"
        .to_string()
}
