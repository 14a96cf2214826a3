//! Gateway result codes and the table that classifies them per operation.

use std::{borrow::Cow, collections::HashMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// A fixed-width numeric result code, e.g. `"000"`.
///
/// The code is kept as text so leading zeros survive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ResultCode(Cow<'static, str>);

impl ResultCode {
    pub const TRANSACTION_CHARGED: ResultCode = ResultCode::from_static("000");
    pub const PENDING_BANK: ResultCode = ResultCode::from_static("003");
    pub const QUEUED_AUTHORIZATION: ResultCode = ResultCode::from_static("005");
    pub const PENDING_SPLIT_PAYMENT: ResultCode = ResultCode::from_static("007");
    pub const NEW_INVOICE: ResultCode = ResultCode::from_static("130");
    pub const TRANSACTION_ALREADY_PAID: ResultCode = ResultCode::from_static("200");
    pub const TOKEN_MISSING: ResultCode = ResultCode::from_static("801");
    pub const INVALID_TOKEN: ResultCode = ResultCode::from_static("802");
    pub const MISSING_REQUEST_OR_NAME: ResultCode = ResultCode::from_static("803");
    pub const XML_ERROR: ResultCode = ResultCode::from_static("804");
    pub const NOT_PAID_YET: ResultCode = ResultCode::from_static("900");
    pub const TRANSACTION_DECLINED: ResultCode = ResultCode::from_static("901");
    pub const DATA_MISMATCH: ResultCode = ResultCode::from_static("902");
    pub const TIME_LIMIT_PASSED: ResultCode = ResultCode::from_static("903");
    pub const TRANSACTION_CANCELLED: ResultCode = ResultCode::from_static("904");
    pub const MISSING_MANDATORY_FIELDS: ResultCode = ResultCode::from_static("950");
    pub const TRANSACTION_DENIED: ResultCode = ResultCode::from_static("999");

    pub const fn from_static(code: &'static str) -> Self {
        ResultCode(Cow::Borrowed(code))
    }

    pub fn new(code: impl Into<String>) -> Self {
        ResultCode(Cow::Owned(code.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"000"`, the only code every operation treats as success.
    pub fn is_success(&self) -> bool {
        *self == Self::TRANSACTION_CHARGED
    }

    /// Human readable meaning of the code.
    pub fn description(&self) -> &'static str {
        match self.as_str() {
            "000" => "Transaction charged",
            "003" => "Transaction pending bank",
            "005" => "Queued authorization",
            "007" => "Pending split payment",
            "130" => "New invoice",
            "200" => "Transaction already paid",
            "801" => "Request missing company token",
            "802" => "Wrong CompanyToken",
            "803" => "No request or error in Request type name",
            "804" => "Error in XML",
            "900" => "Transaction not paid yet",
            "901" => "Transaction declined",
            "902" => "Data mismatch in one of the fields",
            "903" => "The transaction passed the Payment Time Limit",
            "904" => "Transaction cancelled",
            "950" => "Request missing mandatory fields",
            "999" => "Transaction declined",
            _ => "Unknown",
        }
    }
}

impl Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResultCode {
    fn from(value: &str) -> Self {
        ResultCode::new(value)
    }
}

impl Serialize for ResultCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResultCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ResultCode::new(s.trim()))
    }
}

/// How a result code affects an in-flight operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The gateway reached the requested state.
    Success,
    /// The gateway has not settled yet; re-polling is safe.
    Transient,
    /// The request will never succeed without caller intervention.
    Terminal,
}

/// Success and transient codes of one operation. Anything else is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodePartition {
    pub success: Vec<ResultCode>,
    pub transient: Vec<ResultCode>,
}

impl CodePartition {
    pub fn new(success: &[ResultCode], transient: &[ResultCode]) -> Self {
        CodePartition {
            success: success.to_vec(),
            transient: transient.to_vec(),
        }
    }

    pub fn classify(&self, code: &ResultCode) -> Outcome {
        if self.success.contains(code) {
            Outcome::Success
        } else if self.transient.contains(code) {
            Outcome::Transient
        } else {
            Outcome::Terminal
        }
    }
}

/// Maps `(operation, code)` to an [`Outcome`].
///
/// Operations without an entry only accept `"000"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationTable {
    partitions: HashMap<Operation, CodePartition>,
}

impl ClassificationTable {
    /// A table where every operation only accepts `"000"` and nothing is transient.
    pub fn strict() -> Self {
        ClassificationTable {
            partitions: HashMap::new(),
        }
    }

    /// Replace the partition of one operation.
    pub fn with(mut self, operation: Operation, partition: CodePartition) -> Self {
        self.partitions.insert(operation, partition);
        self
    }

    pub fn partition(&self, operation: Operation) -> Option<&CodePartition> {
        self.partitions.get(&operation)
    }

    pub fn classify(&self, operation: Operation, code: &ResultCode) -> Outcome {
        match self.partitions.get(&operation) {
            Some(partition) => partition.classify(code),
            None if code.is_success() => Outcome::Success,
            None => Outcome::Terminal,
        }
    }
}

impl Default for ClassificationTable {
    fn default() -> Self {
        use ResultCode as C;

        let charged = [C::TRANSACTION_CHARGED];

        ClassificationTable::strict()
            .with(Operation::CreateToken, CodePartition::new(&charged, &[]))
            .with(
                Operation::VerifyToken,
                CodePartition::new(
                    &charged,
                    &[
                        C::PENDING_BANK,
                        C::QUEUED_AUTHORIZATION,
                        C::PENDING_SPLIT_PAYMENT,
                    ],
                ),
            )
            .with(
                Operation::CancelToken,
                CodePartition::new(
                    &charged,
                    &[
                        C::XML_ERROR,
                        C::MISSING_MANDATORY_FIELDS,
                        C::TRANSACTION_DENIED,
                    ],
                ),
            )
            .with(
                Operation::RefundToken,
                CodePartition::new(
                    &charged,
                    &[
                        C::TOKEN_MISSING,
                        C::INVALID_TOKEN,
                        C::MISSING_REQUEST_OR_NAME,
                        C::XML_ERROR,
                        C::MISSING_MANDATORY_FIELDS,
                        C::TRANSACTION_DENIED,
                    ],
                ),
            )
            .with(
                Operation::ChargeTokenCreditCard,
                CodePartition::new(&charged, &[]),
            )
            .with(
                Operation::ChargeTokenMobile,
                CodePartition::new(&[C::TRANSACTION_CHARGED, C::NEW_INVOICE], &[]),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zeros_are_kept() {
        let code: ResultCode = "000".into();
        assert!(code.is_success());
        assert_eq!(code.to_string(), "000");
        assert_eq!(code, ResultCode::TRANSACTION_CHARGED);
    }

    #[test]
    fn test_default_table_partitions() {
        let table = ClassificationTable::default();
        let cases = [
            (Operation::CreateToken, "000", Outcome::Success),
            (Operation::CreateToken, "804", Outcome::Terminal),
            (Operation::VerifyToken, "003", Outcome::Transient),
            (Operation::VerifyToken, "900", Outcome::Terminal),
            (Operation::CancelToken, "999", Outcome::Transient),
            (Operation::CancelToken, "801", Outcome::Terminal),
            (Operation::RefundToken, "801", Outcome::Transient),
            (Operation::RefundToken, "902", Outcome::Terminal),
            (Operation::ChargeTokenCreditCard, "200", Outcome::Terminal),
            (Operation::ChargeTokenMobile, "130", Outcome::Success),
        ];

        for (operation, code, expected) in cases {
            assert_eq!(
                table.classify(operation, &code.into()),
                expected,
                "{operation} / {code}"
            );
        }
    }

    #[test]
    fn test_strict_table_only_accepts_charged() {
        let table = ClassificationTable::strict();
        assert_eq!(
            table.classify(Operation::RefundToken, &ResultCode::TRANSACTION_CHARGED),
            Outcome::Success
        );
        assert_eq!(
            table.classify(Operation::RefundToken, &ResultCode::TRANSACTION_DENIED),
            Outcome::Terminal
        );
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(ResultCode::XML_ERROR.description(), "Error in XML");
        assert_eq!(ResultCode::new("123").description(), "Unknown");
    }
}
