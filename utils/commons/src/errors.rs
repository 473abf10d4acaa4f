use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Structurally invalid input, such as the all-zero receiver account
    /// (Error code: -4).
    InvalidInput,
    /// Payment triggered minting is currently disabled (Error code: -5).
    Paused,
    /// Payment amount must be positive (Error code: -6).
    InvalidAmount,
    /// Supply cap reached, no further tokens can be minted (Error code: -7).
    SoldOut,
    /// Upgrade requested with the empty module sentinel (Error code: -8).
    EmptyUpgrade,
    /// Operation would break a ledger invariant (Error code: -9).
    StateConflict,
    /// Owner account is structurally invalid (Error code: -10).
    InvalidOwner,
    /// Image base URI must not be empty at initialization (Error code: -11).
    InvalidImageBaseUri,
    /// Supply cap must be at least one (Error code: -12).
    InvalidTotalSupply,
    /// Mint price must be positive (Error code: -13).
    InvalidMintPrice,
    /// Payment asset contract address is structurally invalid
    /// (Error code: -14).
    InvalidMintAsset,
    /// Failed to invoke a contract (Error code: -15).
    InvokeContractError,
    /// Upgrade failed: the new module does not exist (Error code: -16).
    FailedUpgradeMissingModule,
    /// Upgrade failed: the new module does not contain this contract
    /// (Error code: -17).
    FailedUpgradeMissingContract,
    /// Upgrade failed: the new module is not a supported version
    /// (Error code: -18).
    FailedUpgradeUnsupportedModuleVersion,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to module upgrades to CustomContractError.
impl From<UpgradeError> for CustomContractError {
    fn from(ue: UpgradeError) -> Self {
        match ue {
            UpgradeError::MissingModule => Self::FailedUpgradeMissingModule,
            UpgradeError::MissingContract => Self::FailedUpgradeMissingContract,
            UpgradeError::UnsupportedModuleVersion => Self::FailedUpgradeUnsupportedModuleVersion,
        }
    }
}

/// Mapping CustomContractError to ContractError.
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
