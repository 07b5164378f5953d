use crate::domain::model::{RawRecord, WebhookPayload, SHORTCODE};

/// Fields joined into the outbound message, in wire order. `mobile` is
/// addressing, not content, so it stays out of the join.
const MESSAGE_FIELDS: [&str; 7] = [
    "Firstname",
    "Surname",
    "email",
    "displayname",
    "dateofbirth",
    "KE",
    "Secondary",
];

/// Maps one raw record into the fixed webhook payload shape. Pure and total:
/// missing fields become empty strings, and the mobile-present check belongs
/// to the dispatcher.
pub fn to_payload(record: &RawRecord) -> WebhookPayload {
    let message = MESSAGE_FIELDS
        .iter()
        .map(|field| record.get(field))
        .collect::<Vec<_>>()
        .join(", ");

    WebhookPayload {
        shortcode: SHORTCODE.to_string(),
        mobile: record.get("mobile").to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        )
    }

    #[test]
    fn joins_message_fields_in_fixed_order() {
        let record = record(&[
            ("Firstname", "A"),
            ("Surname", "B"),
            ("email", "c@d.com"),
            ("displayname", "AB"),
            ("dateofbirth", "2000-01-01"),
            ("KE", "KE"),
            ("Secondary", "Sec"),
            ("mobile", "+254700000000"),
        ]);

        let payload = to_payload(&record);
        assert_eq!(payload.shortcode, "22317");
        assert_eq!(payload.mobile, "+254700000000");
        assert_eq!(payload.message, "A, B, c@d.com, AB, 2000-01-01, KE, Sec");
    }

    #[test]
    fn substitutes_empty_strings_for_missing_fields() {
        let record = record(&[("Firstname", "A"), ("Secondary", "Sec")]);
        let payload = to_payload(&record);
        assert_eq!(payload.message, "A, , , , , , Sec");
        assert_eq!(payload.mobile, "");
    }
}
