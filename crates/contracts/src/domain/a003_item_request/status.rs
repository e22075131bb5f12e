use serde::{Deserialize, Serialize};

/// Badge class used for any code outside the known set.
pub const FALLBACK_STATUS_CLASS: &str = "bg-gray-100 text-gray-800";

/// Lifecycle status of an item request.
///
/// Records carry the raw code; codes outside this set still decode and are
/// shown with the fallback badge.
///
/// PENDING -> APPROVED | REJECTED; APPROVED -> FULFILLED | PARTIALLY_FULFILLED;
/// PARTIALLY_FULFILLED repeats until FULFILLED; both fulfilled states -> CONFIRMED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemRequestStatus {
    Pending,
    Approved,
    Rejected,
    Fulfilled,
    PartiallyFulfilled,
    Confirmed,
    Cancelled,
}

impl ItemRequestStatus {
    /// Wire code, e.g. `PARTIALLY_FULFILLED`
    pub fn code(&self) -> &'static str {
        match self {
            ItemRequestStatus::Pending => "PENDING",
            ItemRequestStatus::Approved => "APPROVED",
            ItemRequestStatus::Rejected => "REJECTED",
            ItemRequestStatus::Fulfilled => "FULFILLED",
            ItemRequestStatus::PartiallyFulfilled => "PARTIALLY_FULFILLED",
            ItemRequestStatus::Confirmed => "CONFIRMED",
            ItemRequestStatus::Cancelled => "CANCELLED",
        }
    }

    /// `None` for codes this client does not know.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    pub fn all() -> [ItemRequestStatus; 7] {
        [
            ItemRequestStatus::Pending,
            ItemRequestStatus::Approved,
            ItemRequestStatus::Rejected,
            ItemRequestStatus::Fulfilled,
            ItemRequestStatus::PartiallyFulfilled,
            ItemRequestStatus::Confirmed,
            ItemRequestStatus::Cancelled,
        ]
    }

    /// At least one fulfillment has been recorded.
    pub fn is_fulfilled(&self) -> bool {
        matches!(
            self,
            ItemRequestStatus::Fulfilled | ItemRequestStatus::PartiallyFulfilled
        )
    }

    /// Still waiting for (more) stock from the parent office.
    pub fn awaits_fulfillment(&self) -> bool {
        matches!(
            self,
            ItemRequestStatus::Approved | ItemRequestStatus::PartiallyFulfilled
        )
    }
}

/// `PARTIALLY_FULFILLED` -> `Partially Fulfilled`
pub fn format_status(code: &str) -> String {
    code.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let mut out: String = first.to_uppercase().collect();
                    out.push_str(&chars.as_str().to_lowercase());
                    out
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Badge class for a raw status code. Keys are case-sensitive.
pub fn status_color(code: &str) -> &'static str {
    match code {
        "PENDING" => "bg-yellow-100 text-yellow-800",
        "APPROVED" => "bg-blue-100 text-blue-800",
        "REJECTED" => "bg-red-100 text-red-800",
        "FULFILLED" => "bg-green-100 text-green-800",
        "CONFIRMED" => "bg-emerald-100 text-emerald-800",
        "PARTIALLY_FULFILLED" => "bg-orange-100 text-orange-800",
        "CANCELLED" => "bg-gray-100 text-gray-800",
        _ => FALLBACK_STATUS_CLASS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_status() {
        assert_eq!(format_status("PARTIALLY_FULFILLED"), "Partially Fulfilled");
        assert_eq!(format_status("PENDING"), "Pending");
        assert_eq!(format_status("pending"), "Pending");
        assert_eq!(format_status(""), "");
    }

    #[test]
    fn test_status_color_known_codes() {
        assert_eq!(status_color("PENDING"), "bg-yellow-100 text-yellow-800");
        assert_eq!(status_color("APPROVED"), "bg-blue-100 text-blue-800");
        assert_eq!(status_color("REJECTED"), "bg-red-100 text-red-800");
        assert_eq!(status_color("FULFILLED"), "bg-green-100 text-green-800");
        assert_eq!(status_color("CONFIRMED"), "bg-emerald-100 text-emerald-800");
        assert_eq!(
            status_color("PARTIALLY_FULFILLED"),
            "bg-orange-100 text-orange-800"
        );
        assert_eq!(status_color("CANCELLED"), "bg-gray-100 text-gray-800");
    }

    #[test]
    fn test_status_color_fallback() {
        assert_eq!(status_color("UNKNOWN_CODE"), FALLBACK_STATUS_CLASS);
        assert_eq!(status_color("pending"), FALLBACK_STATUS_CLASS);
    }

    #[test]
    fn test_codes_round_trip_through_serde() {
        for status in ItemRequestStatus::all() {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
            assert_eq!(ItemRequestStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ItemRequestStatus::from_code("SHIPPED"), None);
    }
}
