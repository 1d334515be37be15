use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, Response, UrlSearchParams};

use crate::config::{self, endpoints};
use crate::error::ApiError;
use crate::forms::{CheckSubmission, FormFields};

// -- Records returned by the checking service --

/// Account details shown on the profile page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(alias = "пользователь", alias = "логин")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// `user` in an auth response: older servers send only the login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AuthUser {
    Name(String),
    Profile(UserProfile),
}

impl AuthUser {
    pub fn username(&self) -> &str {
        match self {
            AuthUser::Name(name) => name,
            AuthUser::Profile(profile) => &profile.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "токен")]
    pub token: String,
    #[serde(alias = "пользователь")]
    pub user: AuthUser,
}

/// One historical check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(alias = "файл")]
    pub file: String,
    #[serde(alias = "шаблон")]
    pub template: String,
    #[serde(alias = "оценка")]
    pub score: f64,
    #[serde(alias = "статус")]
    pub status: String,
    #[serde(default, alias = "дата_загрузки")]
    pub upload_date: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportsResponse {
    #[serde(alias = "отчеты")]
    pub reports: Vec<Report>,
}

/// Template name to its server-side definition. The definition is opaque
/// here: the checklist shown to the user is fixed per template name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplatesResponse {
    #[serde(alias = "шаблоны")]
    pub templates: BTreeMap<String, Value>,
}

impl TemplatesResponse {
    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }
}

/// Outcome of one validation request.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CheckResult {
    #[serde(default, alias = "найдено_разделов")]
    pub found_sections: Vec<String>,
    #[serde(default, alias = "отсутствуют")]
    pub missing_sections: Vec<String>,
    #[serde(default, alias = "оценка")]
    pub score: f64,
    #[serde(default, alias = "статус")]
    pub status: String,
    #[serde(default, alias = "совпадения_детально")]
    pub details: String,
    #[serde(default, alias = "файл")]
    pub file: Option<String>,
    #[serde(default, alias = "шаблон")]
    pub template: Option<String>,
    #[serde(default, alias = "ошибка")]
    pub error: Option<String>,
}

// -- Typed endpoint wrappers --

pub async fn login(fields: &FormFields) -> Result<AuthResponse, ApiError> {
    let request = urlencoded_request(endpoints::LOGIN, fields, None)?;
    let resp: AuthResponse = fetch_json(request).await?;
    info!(user = resp.user.username(), "logged in");
    Ok(resp)
}

pub async fn register(fields: &FormFields) -> Result<AuthResponse, ApiError> {
    let request = urlencoded_request(endpoints::REGISTER, fields, None)?;
    let resp: AuthResponse = fetch_json(request).await?;
    info!(user = resp.user.username(), "registered");
    Ok(resp)
}

pub async fn list_templates() -> Result<TemplatesResponse, ApiError> {
    let init = RequestInit::new();
    init.set_method("GET");
    let request = build_request(endpoints::TEMPLATES, &init, None)?;
    fetch_json(request).await
}

/// Upload a document for checking against `submission.template`.
pub async fn check_document(
    submission: &CheckSubmission<web_sys::File>,
    token: Option<&str>,
) -> Result<CheckResult, ApiError> {
    let form = FormData::new().map_err(|e| ApiError::Encode(js_error_text(&e)))?;
    form.append_with_blob_and_filename("file", &submission.file, &submission.file_name)
        .map_err(|e| ApiError::Encode(js_error_text(&e)))?;
    form.append_with_str("template", &submission.template)
        .map_err(|e| ApiError::Encode(js_error_text(&e)))?;
    if let Some(token) = token {
        form.append_with_str("token", token)
            .map_err(|e| ApiError::Encode(js_error_text(&e)))?;
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&form);
    let request = build_request(endpoints::CHECK, &init, token)?;

    info!(
        file = %submission.file_name,
        template = %submission.template,
        "submitting document for check"
    );
    let result: CheckResult = fetch_json(request).await?;
    info!(score = result.score, status = %result.status, "check finished");
    Ok(result)
}

pub async fn get_profile(token: &str) -> Result<UserProfile, ApiError> {
    let fields = vec![("token", token.to_string())];
    let request = urlencoded_request(endpoints::PROFILE, &fields, Some(token))?;
    fetch_json(request).await
}

pub async fn my_reports(token: &str) -> Result<Vec<Report>, ApiError> {
    let fields = vec![("token", token.to_string())];
    let request = urlencoded_request(endpoints::MY_REPORTS, &fields, Some(token))?;
    let resp: ReportsResponse = fetch_json(request).await?;
    debug!(count = resp.reports.len(), "reports loaded");
    Ok(resp.reports)
}

// -- Transport --

fn urlencoded_request(
    path: &str,
    fields: &FormFields,
    token: Option<&str>,
) -> Result<Request, ApiError> {
    let params = UrlSearchParams::new().map_err(|e| ApiError::Encode(js_error_text(&e)))?;
    for (name, value) in fields {
        params.append(name, value);
    }

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&params);
    build_request(path, &init, token)
}

/// Attach the bearer header (when a token is known) and resolve the URL.
fn build_request(path: &str, init: &RequestInit, token: Option<&str>) -> Result<Request, ApiError> {
    if let Some(token) = token {
        let headers = Headers::new().map_err(|e| ApiError::Encode(js_error_text(&e)))?;
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(|e| ApiError::Encode(js_error_text(&e)))?;
        init.set_headers(&headers);
    }

    let url = config::current().endpoint(path);
    Request::new_with_str_and_init(&url, init).map_err(|e| ApiError::Encode(js_error_text(&e)))
}

async fn fetch_json<T: DeserializeOwned>(request: Request) -> Result<T, ApiError> {
    let window = web_sys::window().ok_or_else(|| ApiError::Network("window not available".to_string()))?;
    let url = request.url();

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| {
            warn!(%url, "fetch failed");
            ApiError::Network(js_error_text(&e))
        })?;
    let response: Response = value
        .dyn_into()
        .map_err(|_| ApiError::Malformed("fetch did not resolve to a Response".to_string()))?;

    let body = match response.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    debug!(%url, status = response.status(), bytes = body.len(), "response received");

    interpret(response.status(), &response.status_text(), &body)
}

/// Map a status line and raw body to a typed result.
///
/// A 2xx body that carries `error` (or a lone `detail` where the expected
/// record fails to decode) is a rejection, not a success.
pub(crate) fn interpret<T: DeserializeOwned>(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<T, ApiError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !(200..300).contains(&status) {
        let detail = parsed
            .as_ref()
            .and_then(error_detail)
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| {
                if status_text.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    status_text.to_string()
                }
            });
        return Err(ApiError::Http { status, detail });
    }

    let value = parsed.ok_or_else(|| ApiError::Malformed("response body is not JSON".to_string()))?;

    if let Some(msg) = value
        .get("error")
        .or_else(|| value.get("ошибка"))
        .and_then(Value::as_str)
    {
        return Err(ApiError::Rejected(msg.to_string()));
    }

    match serde_json::from_value::<T>(value.clone()) {
        Ok(record) => Ok(record),
        Err(e) => match error_detail(&value) {
            Some(detail) => Err(ApiError::Rejected(detail)),
            None => Err(ApiError::Malformed(e.to_string())),
        },
    }
}

/// Pull a human-readable message out of an error body.
///
/// FastAPI sends `detail` either as a string or as a list of validation
/// entries with a `msg` field.
pub(crate) fn error_detail(body: &Value) -> Option<String> {
    if let Some(detail) = body.get("detail") {
        return match detail {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            Value::Null => None,
            other => Some(other.to_string()),
        };
    }

    body.get("error")
        .or_else(|| body.get("ошибка"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn js_error_text(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_english_keys() {
        let body = r#"{"token":"abc","user":{"id":7,"username":"student","email":"s@example.com","full_name":"Иван Петров"}}"#;
        let resp: AuthResponse = interpret(200, "OK", body).unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.user.username(), "student");
        match resp.user {
            AuthUser::Profile(p) => {
                assert_eq!(p.id, Some(7));
                assert_eq!(p.full_name.as_deref(), Some("Иван Петров"));
            }
            AuthUser::Name(_) => panic!("expected a full profile"),
        }
    }

    #[test]
    fn test_auth_response_russian_keys_with_bare_username() {
        let body = r#"{"токен":"xyz","пользователь":"admin"}"#;
        let resp: AuthResponse = interpret(200, "OK", body).unwrap();
        assert_eq!(resp.token, "xyz");
        assert_eq!(resp.user, AuthUser::Name("admin".to_string()));
    }

    #[test]
    fn test_check_result_russian_keys() {
        let body = r#"{
            "найдено_разделов": ["Титульный лист", "Введение (найден как: 'Цель работы')"],
            "отсутствуют": ["Литература"],
            "оценка": 83.3,
            "статус": "Отлично",
            "совпадения_детально": "Найдено 5 из 6 разделов",
            "файл": "lab1.docx",
            "шаблон": "лабораторная"
        }"#;
        let result: CheckResult = interpret(200, "OK", body).unwrap();
        assert_eq!(result.found_sections.len(), 2);
        assert_eq!(result.missing_sections, vec!["Литература".to_string()]);
        assert!((result.score - 83.3).abs() < f64::EPSILON);
        assert_eq!(result.status, "Отлично");
        assert_eq!(result.file.as_deref(), Some("lab1.docx"));
        assert_eq!(result.template.as_deref(), Some("лабораторная"));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_error_field_on_success_is_rejection() {
        let body = r#"{"ошибка":"Нужен файл .docx"}"#;
        let err = interpret::<CheckResult>(200, "OK", body).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Нужен файл .docx".to_string()));

        let body = r#"{"error":"Шаблон 'диплом' не найден"}"#;
        let err = interpret::<CheckResult>(200, "OK", body).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Шаблон 'диплом' не найден".to_string()));
    }

    #[test]
    fn test_register_detail_on_success_is_rejection() {
        let body = r#"{"detail":"Пользователь уже существует"}"#;
        let err = interpret::<AuthResponse>(200, "OK", body).unwrap_err();
        assert_eq!(err, ApiError::Rejected("Пользователь уже существует".to_string()));
    }

    #[test]
    fn test_http_error_uses_detail_string() {
        let body = r#"{"detail":"Неверный логин или пароль"}"#;
        let err = interpret::<AuthResponse>(401, "Unauthorized", body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 401,
                detail: "Неверный логин или пароль".to_string()
            }
        );
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_http_error_uses_first_validation_msg() {
        let body = r#"{"detail":[{"loc":["body","username"],"msg":"field required","type":"value_error.missing"}]}"#;
        let err = interpret::<AuthResponse>(422, "Unprocessable Entity", body).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 422,
                detail: "field required".to_string()
            }
        );
    }

    #[test]
    fn test_http_error_without_body_falls_back_to_status_text() {
        let err = interpret::<AuthResponse>(502, "Bad Gateway", "").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                detail: "Bad Gateway".to_string()
            }
        );

        let err = interpret::<AuthResponse>(503, "", "<html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 503,
                detail: "HTTP 503".to_string()
            }
        );
    }

    #[test]
    fn test_non_json_success_is_malformed() {
        let err = interpret::<CheckResult>(200, "OK", "<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_wrong_shape_success_is_malformed() {
        let err = interpret::<AuthResponse>(200, "OK", r#"{"session":"abc"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_reports_keep_server_order() {
        let body = r#"{"reports":[
            {"id":3,"file":"c.docx","template":"курсовая","score":50.0,"status":"Удовлетворительно","upload_date":"2024-05-03"},
            {"id":1,"file":"a.docx","template":"лабораторная","score":100.0,"status":"Отлично","upload_date":"2024-05-01"},
            {"id":2,"file":"b.docx","template":"лабораторная","score":66.7,"status":"Хорошо","upload_date":"2024-05-02"}
        ]}"#;
        let resp: ReportsResponse = interpret(200, "OK", body).unwrap();
        let ids: Vec<i64> = resp.reports.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_reports_russian_keys() {
        let body = r#"{"отчеты":[
            {"id":5,"файл":"kurs.docx","шаблон":"курсовая","оценка":83.3,"статус":"Отлично","дата_загрузки":"2024-06-01"},
            {"id":4,"файл":"lab2.docx","шаблон":"лабораторная","оценка":33.3,"статус":"Требует доработки"}
        ]}"#;
        let resp: ReportsResponse = interpret(200, "OK", body).unwrap();
        assert_eq!(resp.reports.len(), 2);

        let first = &resp.reports[0];
        assert_eq!(first.id, 5);
        assert_eq!(first.file, "kurs.docx");
        assert_eq!(first.template, "курсовая");
        assert!((first.score - 83.3).abs() < f64::EPSILON);
        assert_eq!(first.status, "Отлично");
        assert_eq!(first.upload_date, "2024-06-01");

        // upload date is optional
        assert_eq!(resp.reports[1].upload_date, "");
        assert_eq!(resp.reports[1].template, "лабораторная");
    }

    #[test]
    fn test_templates_names() {
        let body = r#"{"шаблоны":{"лабораторная":["Введение"],"курсовая":["Содержание"]}}"#;
        let resp: TemplatesResponse = interpret(200, "OK", body).unwrap();
        let names = resp.names();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"лабораторная".to_string()));
        assert!(names.contains(&"курсовая".to_string()));
    }

    #[test]
    fn test_profile_from_login_only_shape() {
        let body = r#"{"пользователь":"student","сообщение":"Привет, student!"}"#;
        let profile: UserProfile = interpret(200, "OK", body).unwrap();
        assert_eq!(profile.username, "student");
        assert_eq!(profile.id, None);
        assert_eq!(profile.email, None);
    }

    #[test]
    fn test_profile_login_alias() {
        let body = r#"{"id":2,"логин":"ivan","email":"ivan@example.com","full_name":"Иван Петров"}"#;
        let profile: UserProfile = interpret(200, "OK", body).unwrap();
        assert_eq!(profile.username, "ivan");
        assert_eq!(profile.id, Some(2));
        assert_eq!(profile.email.as_deref(), Some("ivan@example.com"));
        assert_eq!(profile.full_name.as_deref(), Some("Иван Петров"));
    }
}
