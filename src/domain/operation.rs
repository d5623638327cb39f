use std::fmt;

/// The four REST operations exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    GetStatus,
    Confirm,
    Refund,
}

impl Operation {
    /// Path of the operation relative to the gateway endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Operation::Register => "register.do",
            Operation::GetStatus => "getOrderStatus.do",
            Operation::Confirm => "confirmOrder.do",
            Operation::Refund => "refund.do",
        }
    }

    /// Short name used in logs and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Register => "register",
            Operation::GetStatus => "get_status",
            Operation::Confirm => "confirm",
            Operation::Refund => "refund",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
