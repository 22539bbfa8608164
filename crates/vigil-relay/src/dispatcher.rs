//! Outbound delivery through the platform's channel-send REST API.

use serde_json::{json, Value};
use vigil_audit::Report;
use vigil_handlers::{Dispatch, DispatchError};
use vigil_types::ChannelId;

/// Production dispatcher: posts each report as an embed to
/// `POST {api_base}/channels/{id}/messages`.
///
/// Delivery is fire-and-forget from the relay's point of view; any retry
/// behavior belongs to the platform client or not at all.
#[derive(Debug, Clone)]
pub struct RestDispatcher {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl RestDispatcher {
    pub fn new(api_base: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }
}

impl Dispatch for RestDispatcher {
    async fn deliver(&self, channel: ChannelId, report: &Report) -> Result<(), DispatchError> {
        let url = format!("{}/channels/{}/messages", self.api_base, channel);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Bot {}", self.token))
            .json(&embed_body(report))
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DispatchError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}

/// Renders a report into the platform's embed message body.
fn embed_body(report: &Report) -> Value {
    let fields: Vec<Value> = report
        .entries
        .iter()
        .map(|entry| {
            json!({
                "name": entry.name,
                "value": entry.value,
                "inline": false,
            })
        })
        .collect();

    let mut embed = json!({
        "title": report.title,
        "description": report.description,
        "color": report.accent.rgb(),
        "fields": fields,
    });
    if let Some(url) = &report.thumbnail_url {
        embed["thumbnail"] = json!({ "url": url });
    }
    if let Some(footer) = &report.footer {
        embed["footer"] = json!({ "text": footer });
    }

    json!({ "embeds": [embed] })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_audit::EntityRef;
    use vigil_types::EntityKind;

    #[test]
    fn embed_body_carries_title_fields_and_color() {
        let report = Report::created(EntityKind::Channel, EntityRef::new("<#1>", 1u64))
            .field("Category", "General");

        let body = embed_body(&report);
        let embed = &body["embeds"][0];

        assert_eq!(embed["title"], "Channel Created");
        assert_eq!(embed["description"], "Channel **<#1>** was created.");
        assert_eq!(embed["color"], 0x2ECC71);
        assert_eq!(embed["fields"][0]["name"], "Category");
        assert_eq!(embed["fields"][0]["value"], "General");
        assert_eq!(embed["fields"][0]["inline"], false);
        assert!(embed.get("thumbnail").is_none());
    }

    #[test]
    fn embed_body_includes_thumbnail_and_footer_when_set() {
        let report = Report::deleted(EntityKind::Member, EntityRef::new("casey", 4u64))
            .with_thumbnail("https://cdn.example/casey.png")
            .with_footer("Member left | Test Guild");

        let body = embed_body(&report);
        let embed = &body["embeds"][0];

        assert_eq!(embed["thumbnail"]["url"], "https://cdn.example/casey.png");
        assert_eq!(embed["footer"]["text"], "Member left | Test Guild");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let dispatcher = RestDispatcher::new("https://api.chat.example/v1/", "tok");
        assert_eq!(dispatcher.api_base, "https://api.chat.example/v1");
    }
}
