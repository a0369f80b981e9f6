//! Web form front end
//!
//! One HTML page with a form per operation. Each POST runs the action and
//! re-renders the page with a success banner or an inline error banner.

use axum::{
    Form, Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use serde::Deserialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use super::{Action, Outcome, parse_properties, submit};
use crate::api::{CrmError, HubSpotClient, Lead};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub client: HubSpotClient,
    /// Shown in the page header so a missing token is obvious
    pub token_preview: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/contacts/find", post(find_contact))
        .route("/contacts/upsert", post(upsert_contact))
        .route("/workflows/enroll", post(enroll))
        .route("/deals", post(create_deal))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Web form listening on http://{}", addr);
    println!("Serving HubSpot forms on http://{}", addr);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct FindForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct UpsertForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct EnrollForm {
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub workflow_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DealForm {
    #[serde(default)]
    pub contact_id: String,
    #[serde(default)]
    pub properties: String,
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state, None))
}

async fn find_contact(State(state): State<AppState>, Form(form): Form<FindForm>) -> Html<String> {
    run(&state, Action::FindContact { email: form.email }).await
}

async fn upsert_contact(
    State(state): State<AppState>,
    Form(form): Form<UpsertForm>,
) -> Html<String> {
    let lead = Lead {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        company: form.company,
        phone: form.phone,
    };
    run(&state, Action::UpsertContact { lead }).await
}

async fn enroll(State(state): State<AppState>, Form(form): Form<EnrollForm>) -> Html<String> {
    let action = Action::Enroll {
        contact_id: form.contact_id,
        workflow_id: form.workflow_id,
    };
    run(&state, action).await
}

async fn create_deal(State(state): State<AppState>, Form(form): Form<DealForm>) -> Html<String> {
    let action = Action::CreateDeal {
        contact_id: form.contact_id,
        properties: parse_properties(&form.properties),
    };
    run(&state, action).await
}

async fn run(state: &AppState, action: Action) -> Html<String> {
    let result = submit(&state.client, action).await;
    Html(render_page(state, Some(&result)))
}

fn banner(result: &Result<Outcome, CrmError>) -> String {
    match result {
        Ok(outcome) if outcome.is_positive() => format!(
            "<div class=\"banner success\">{}</div>",
            escape_html(&outcome.to_string())
        ),
        Ok(outcome) => format!(
            "<div class=\"banner error\">{}</div>",
            escape_html(&outcome.to_string())
        ),
        Err(e) => format!(
            "<div class=\"banner error\">{}</div>",
            escape_html(&e.to_string())
        ),
    }
}

fn render_page(state: &AppState, result: Option<&Result<Outcome, CrmError>>) -> String {
    let banner = result.map(banner).unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>HubSpot Integration</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }}
.banner {{ padding: 0.75rem; margin: 1rem 0; border-radius: 4px; white-space: pre-wrap; }}
.success {{ background: #e6f4ea; }}
.error {{ background: #fde7e9; }}
label {{ display: block; margin-top: 0.5rem; }}
</style>
</head>
<body>
<h1>HubSpot Integration</h1>
<p>Token: {token}</p>
{banner}
<h2>Find Contact by Email</h2>
<form method="post" action="/contacts/find">
<label>Email <input name="email"></label>
<button type="submit">Find Contact</button>
</form>
<h2>Create or Update Contact</h2>
<form method="post" action="/contacts/upsert">
<label>Email <input name="email"></label>
<label>First Name <input name="first_name"></label>
<label>Last Name <input name="last_name"></label>
<label>Company <input name="company"></label>
<label>Phone <input name="phone"></label>
<button type="submit">Create/Update Contact</button>
</form>
<h2>Enroll Contact in Workflow</h2>
<form method="post" action="/workflows/enroll">
<label>Contact ID <input name="contact_id"></label>
<label>Workflow ID <input name="workflow_id"></label>
<button type="submit">Enroll Contact</button>
</form>
<h2>Create Deal for Contact</h2>
<form method="post" action="/deals">
<label>Contact ID <input name="contact_id"></label>
<label>Deal Properties (key=value, one per line)<br><textarea name="properties" rows="5" cols="40"></textarea></label>
<button type="submit">Create Deal</button>
</form>
</body>
</html>
"#,
        token = escape_html(&state.token_preview),
        banner = banner,
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
