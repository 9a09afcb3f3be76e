use serde::{Deserialize, Serialize};
use serde_json::json;
use surrealdb::RecordId;

use crate::models::user::Role;
use crate::utils::time::time_now;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutboxMessage {
    pub id: RecordId,
    pub to: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub metadata: serde_json::Value,

    // ? delivery state: pending until sent or logged; errors stay pending
    pub sent: bool,
    #[serde(default)]
    pub logged: bool,
    pub last_error: Option<String>,
    pub provider: Option<String>,

    pub created_at: String,
    pub sent_at: Option<String>,
    pub logged_at: Option<String>,
    pub attempted_at: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreateOutboxMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub metadata: serde_json::Value,
    pub sent: bool,
    pub logged: bool,
    pub created_at: String,
}

impl CreateOutboxMessage {
    /// Acceptance email enqueued alongside every created invite. The link
    /// carries the raw token; this is the only place it leaves the service
    /// besides the create response.
    pub fn invite_email(
        app_url: &str,
        dynamic_link_domain: Option<&str>,
        invite_id: &str,
        invited_email: &str,
        role: Role,
        allowed_classes: &[String],
        token: &str,
        expires_in_days: i64,
    ) -> Self {
        let invite_link = format!("{}/accept-invite?token={}", app_url, token);
        let dynamic_link = dynamic_link_domain
            .map(|domain| format!("https://{}/?link={}", domain, urlencode(&invite_link)));

        let mut body_lines = vec![
            "Hello,".to_string(),
            String::new(),
            format!("You have been invited to join the Attendance app as {}.", role),
            "Click the link to accept:".to_string(),
            String::new(),
            invite_link,
        ];
        if let Some(link) = &dynamic_link {
            body_lines.push(String::new());
            body_lines.push("If clicking from mobile, try this link:".to_string());
            body_lines.push(String::new());
            body_lines.push(link.clone());
        }
        body_lines.push(String::new());
        body_lines.push(format!("This link expires in {} days.", expires_in_days));

        Self {
            to: invited_email.to_string(),
            subject: format!("You're invited to join the Attendance app as {}", role),
            body: body_lines.join("\n"),
            metadata: json!({
                "invite_id": invite_id,
                "role": role,
                "allowed_classes": allowed_classes,
                "dynamic_link": dynamic_link,
            }),
            sent: false,
            logged: false,
            created_at: time_now(),
        }
    }
}

fn urlencode(val: &str) -> String {
    let mut out = String::with_capacity(val.len());
    for byte in val.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
