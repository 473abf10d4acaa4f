use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type. Token IDs are the ASCII decimal rendering of the
/// mint counter, so their length grows with the collection.
pub type ContractTokenId = TokenIdVec;

/// Contract token amount type. Also the unit of the mint price, denominated
/// in the payment token.
pub type ContractTokenAmount = TokenAmountU64;

/// Wrapping the custom errors in a type with CIS-2 errors.
pub type ContractError = Cis2Error<CustomContractError>;
