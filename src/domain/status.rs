use serde::Serialize;
use std::fmt;

/// Symbolic order status derived from the gateway's numeric `OrderStatus`.
///
/// Never stored: it is recomputed from the code every time it is read.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub enum OrderStatus {
    Pending,
    PartiallyPaid,
    Paid,
    Refunded,
    Declined,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Maps a gateway status code. Unknown codes are reported as `Failed`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 | 5 => OrderStatus::Pending,
            1 => OrderStatus::PartiallyPaid,
            2 => OrderStatus::Paid,
            4 => OrderStatus::Refunded,
            6 => OrderStatus::Declined,
            7 => OrderStatus::Cancelled,
            _ => OrderStatus::Failed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::PartiallyPaid => "PartiallyPaid",
            OrderStatus::Paid => "Paid",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Declined => "Declined",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Failed => "Failed",
        }
    }
}

impl From<i64> for OrderStatus {
    fn from(code: i64) -> Self {
        Self::from_code(code)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(OrderStatus::from_code(0), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_code(1), OrderStatus::PartiallyPaid);
        assert_eq!(OrderStatus::from_code(2), OrderStatus::Paid);
        assert_eq!(OrderStatus::from_code(4), OrderStatus::Refunded);
        assert_eq!(OrderStatus::from_code(5), OrderStatus::Pending);
        assert_eq!(OrderStatus::from_code(6), OrderStatus::Declined);
        assert_eq!(OrderStatus::from_code(7), OrderStatus::Cancelled);
    }

    #[test]
    fn test_unknown_codes_are_failed() {
        for code in [3, 8, 99, -1, i64::MAX] {
            assert_eq!(OrderStatus::from(code), OrderStatus::Failed);
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OrderStatus::from_code(2).to_string(), "Paid");
        assert_eq!(OrderStatus::from_code(4).to_string(), "Refunded");
        assert_eq!(OrderStatus::from_code(99).to_string(), "Failed");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"PartiallyPaid\"");
    }
}
