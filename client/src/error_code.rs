//! Custom error codes reported by the merkle distributor program.
//!
//! Anchor numbers a program's custom errors from [ERROR_CODE_OFFSET] in declaration
//! order, so the catalog covers `6000..=6011`. Codes outside that range belong to another
//! program or a newer program version and map to `None`.

use std::fmt;

use anchor_lang::error::ERROR_CODE_OFFSET;
use solana_program::{instruction::InstructionError, program_error::ProgramError};

/// Name, code and message of one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDescriptor {
    pub code: u32,
    pub name: &'static str,
    pub msg: &'static str,
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}

const fn entry(offset: u32, name: &'static str, msg: &'static str) -> ErrorDescriptor {
    ErrorDescriptor {
        code: ERROR_CODE_OFFSET + offset,
        name,
        msg,
    }
}

static CATALOG: [ErrorDescriptor; 12] = [
    entry(0, "InsufficientUnlockedTokens", "Insufficient unlocked tokens"),
    entry(1, "InvalidProof", "Invalid Merkle proof."),
    entry(2, "ExceededMaxClaim", "Exceeded maximum claim amount"),
    entry(3, "MaxNodesExceeded", "Exceeded maximum node count"),
    entry(
        4,
        "Unauthorized",
        "Account is not authorized to execute this instruction",
    ),
    entry(
        5,
        "OwnerMismatch",
        "Token account owner did not match intended owner",
    ),
    entry(6, "ClawbackAlreadyClaimed", "Clawback already claimed"),
    entry(7, "SameAdmin", "New and old admin are identical"),
    entry(8, "ClaimExpired", "Claim window expired"),
    entry(9, "ArithmeticError", "Arithmetic Error (overflow/underflow)"),
    entry(
        10,
        "StartTimestampAfterEnd",
        "Start Timestamp cannot be after end Timestamp",
    ),
    entry(11, "TimestampsNotInFuture", "Timestamps cannot be in the past"),
];

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    InsufficientUnlockedTokens = ERROR_CODE_OFFSET,
    InvalidProof,
    ExceededMaxClaim,
    MaxNodesExceeded,
    Unauthorized,
    OwnerMismatch,
    ClawbackAlreadyClaimed,
    SameAdmin,
    ClaimExpired,
    ArithmeticError,
    StartTimestampAfterEnd,
    TimestampsNotInFuture,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 12] = [
        ErrorCode::InsufficientUnlockedTokens,
        ErrorCode::InvalidProof,
        ErrorCode::ExceededMaxClaim,
        ErrorCode::MaxNodesExceeded,
        ErrorCode::Unauthorized,
        ErrorCode::OwnerMismatch,
        ErrorCode::ClawbackAlreadyClaimed,
        ErrorCode::SameAdmin,
        ErrorCode::ClaimExpired,
        ErrorCode::ArithmeticError,
        ErrorCode::StartTimestampAfterEnd,
        ErrorCode::TimestampsNotInFuture,
    ];

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn descriptor(self) -> &'static ErrorDescriptor {
        &CATALOG[(self.code() - ERROR_CODE_OFFSET) as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn msg(self) -> &'static str {
        self.descriptor().msg
    }

    pub fn from_code(code: u32) -> Option<Self> {
        let index = code.checked_sub(ERROR_CODE_OFFSET)?;
        Self::ALL.get(index as usize).copied()
    }

    /// Extracts a catalog entry from a failed instruction, e.g. the inner error of
    /// `TransactionError::InstructionError(_, err)`.
    pub fn from_instruction_error(err: &InstructionError) -> Option<Self> {
        match err {
            InstructionError::Custom(code) => Self::from_code(*code),
            _ => None,
        }
    }

    pub fn from_program_error(err: &ProgramError) -> Option<Self> {
        match err {
            ProgramError::Custom(code) => Self::from_code(*code),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.descriptor().fmt(f)
    }
}

impl std::error::Error for ErrorCode {}

/// Looks up a program-reported code. Unknown codes return `None`.
pub fn lookup(code: u32) -> Option<&'static ErrorDescriptor> {
    ErrorCode::from_code(code).map(ErrorCode::descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_catalog_code_resolves() {
        for code in 6000..=6011 {
            let descriptor = lookup(code).expect("catalog entry");
            assert_eq!(descriptor.code, code);
        }
    }

    #[test]
    fn test_unknown_codes_are_absent() {
        assert_eq!(lookup(9999), None);
        assert_eq!(lookup(6012), None);
        assert_eq!(lookup(5999), None);
        assert_eq!(lookup(0), None);
        assert_eq!(lookup(u32::MAX), None);
    }

    #[test]
    fn test_enum_matches_table_order() {
        for (i, code) in ErrorCode::ALL.iter().enumerate() {
            assert_eq!(code.code(), 6000 + i as u32);
            assert_eq!(ErrorCode::from_code(code.code()), Some(*code));
            assert_eq!(format!("{code:?}"), code.name());
        }
    }

    #[test]
    fn test_display_prefixes_code() {
        assert_eq!(
            ErrorCode::InvalidProof.to_string(),
            "6001: Invalid Merkle proof."
        );
        assert_eq!(
            lookup(6011).unwrap().to_string(),
            "6011: Timestamps cannot be in the past"
        );
    }

    #[test]
    fn test_from_instruction_error() {
        assert_eq!(
            ErrorCode::from_instruction_error(&InstructionError::Custom(6008)),
            Some(ErrorCode::ClaimExpired)
        );
        assert_eq!(
            ErrorCode::from_instruction_error(&InstructionError::Custom(1)),
            None
        );
        assert_eq!(
            ErrorCode::from_instruction_error(&InstructionError::InvalidArgument),
            None
        );
        assert_eq!(
            ErrorCode::from_program_error(&ProgramError::Custom(6004)),
            Some(ErrorCode::Unauthorized)
        );
    }
}
