use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Incoming bot update. Only the fields this system reads are modeled;
/// everything else in the Telegram payload is ignored by serde.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub message: Option<IncomingMessage>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub text: Option<String>,
    pub from: Option<TelegramUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramUser {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub data: Option<String>,
    pub from: Option<TelegramUser>,
}

static DEAL_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"deal_id:(\d+)").unwrap());
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"amount:(\d+\.?\d*)").unwrap());
static USER_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"user_id:(\d+)").unwrap());

/// Fields extracted from a purchase-confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPurchase {
    pub deal_id: i32,
    pub amount: String,
    pub user_id: Option<String>,
}

/// Extracts `deal_id:<n>` and `amount:<decimal>` from free text.
/// Both are required; `user_id:<n>` is optional. Returns `None` when
/// either required field is missing or malformed.
pub fn parse_purchase_confirmation(text: &str) -> Option<ParsedPurchase> {
    let deal_id = DEAL_ID_RE
        .captures(text)
        .and_then(|c| c[1].parse::<i32>().ok())?;
    let amount = AMOUNT_RE.captures(text).map(|c| c[1].to_string())?;
    let user_id = USER_ID_RE.captures(text).map(|c| c[1].to_string());

    Some(ParsedPurchase {
        deal_id,
        amount,
        user_id,
    })
}

/// Extracts the deal id from a `deal_<id>` callback payload.
pub fn parse_deal_callback(data: &str) -> Option<i32> {
    data.strip_prefix("deal_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_purchase_confirmation() {
        let parsed = parse_purchase_confirmation(
            "purchase_confirmed deal_id:7 amount:1999.50 user_id:123456",
        )
        .unwrap();
        assert_eq!(
            parsed,
            ParsedPurchase {
                deal_id: 7,
                amount: "1999.50".to_string(),
                user_id: Some("123456".to_string()),
            }
        );
    }

    #[test]
    fn amount_without_decimals_is_accepted() {
        let parsed = parse_purchase_confirmation("purchase_confirmed deal_id:3 amount:850").unwrap();
        assert_eq!(parsed.amount, "850");
        assert_eq!(parsed.user_id, None);
    }

    #[test]
    fn missing_required_field_yields_none() {
        assert!(parse_purchase_confirmation("purchase_confirmed amount:100").is_none());
        assert!(parse_purchase_confirmation("purchase_confirmed deal_id:5").is_none());
        assert!(parse_purchase_confirmation("hello world").is_none());
    }

    #[test]
    fn deal_callback_round_trip() {
        assert_eq!(parse_deal_callback("deal_42"), Some(42));
        assert_eq!(parse_deal_callback("deal_"), None);
        assert_eq!(parse_deal_callback("other_42"), None);
    }
}
