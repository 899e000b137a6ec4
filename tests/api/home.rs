//! tests/api/home.rs

use crate::helpers::setup;

#[tokio::test]
async fn index_page_contains_the_appointment_form() {
    let test = setup().await;

    let response = test.get("/").await;

    assert_eq!(200, response.status().as_u16());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let html = response.text().await.unwrap();
    assert!(html.contains(r#"action="/agendar-consulta/""#));
    for field in ["name", "phone", "email", "message"] {
        assert!(
            html.contains(&format!(r#"name="{}""#, field)),
            "The form has no `{}` field.",
            field
        );
    }
}

#[tokio::test]
async fn contact_script_is_served() {
    let test = setup().await;

    let response = test.get("/static/js/contact.js").await;

    assert_eq!(200, response.status().as_u16());
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/javascript"));
    assert!(response.text().await.unwrap().contains("/agendar-consulta/"));
}

#[tokio::test]
async fn unknown_paths_return_404() {
    let test = setup().await;

    let response = test.get("/nao-existe").await;

    assert_eq!(404, response.status().as_u16());
}
