use crate::types::{DigestError, Result};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

/// Mailgun-style transport: one POST to `<base>/messages` with basic
/// auth and form fields. Any non-success response is fatal for the
/// run; the caller must not record a send after a failure here.
pub struct Mailer {
    client: Client,
    endpoint: Url,
    api_key: String,
    from_addr: String,
    to_addrs: Vec<String>,
}

impl Mailer {
    pub fn new(
        client: Client,
        base_api_url: &str,
        api_key: String,
        from_addr: String,
        to_addrs: Vec<String>,
    ) -> Result<Self> {
        // join() would swallow a trailing path segment without the slash
        let base = if base_api_url.ends_with('/') {
            base_api_url.to_string()
        } else {
            format!("{base_api_url}/")
        };
        let endpoint = Url::parse(&base)?.join("messages")?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            from_addr,
            to_addrs,
        })
    }

    pub async fn send(&self, subject: &str, text: &str) -> Result<()> {
        let mut form: Vec<(&str, &str)> = vec![
            ("from", self.from_addr.as_str()),
            ("subject", subject),
            ("text", text),
        ];
        for to_addr in &self.to_addrs {
            form.push(("to", to_addr));
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(DigestError::SendRejected {
                status: status.as_u16(),
                body,
            });
        }

        info!("mail transport accepted message for {} recipients", self.to_addrs.len());
        debug!("mail transport response: {body}");
        Ok(())
    }
}
