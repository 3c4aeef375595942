use super::show::ShowId;
use serde::{Deserialize, Serialize};

/// Body of `POST /emails/send`. Built per submission, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub show_id: ShowId,
    pub guest_name: String,
    pub guest_email: String,
    pub message: Option<String>,
}

/// What the backend answers with when it has something to say about a sent email.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailReceipt {
    pub subject: String,
    pub to: String,
    #[serde(default)]
    pub preview: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_all_four_keys() {
        let req = EmailRequest {
            show_id: 7,
            guest_name: "Ada".to_string(),
            guest_email: "ada@example.com".to_string(),
            message: None,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "show_id": 7,
                "guest_name": "Ada",
                "guest_email": "ada@example.com",
                "message": null,
            })
        );
    }
}
