use commons::*;
use concordium_cis2::*;
use concordium_std::*;

/// Parameters for initializing a new collection.
#[derive(Debug, Serialize, SchemaType)]
pub struct InitParams {
    /// Account with administrative authority over the collection.
    pub owner: AccountAddress,
    /// Prefix for generated token image URLs.
    pub image_base_uri: String,
    /// Supply cap. Must be at least one.
    pub total_supply: u64,
    /// Price of a single mint in units of the payment token.
    pub mint_price: ContractTokenAmount,
    /// CIS-2 token contract accepted as payment for mints.
    pub mint_asset: ContractAddress,
}

/// Parameters for the `transfer` endpoint. Tokens of this collection are
/// non-fungible and always move whole, so only the receiver, the token and
/// the receive hook payload are needed.
#[derive(Debug, Serialize, SchemaType)]
pub struct TransferParameter {
    /// Receiver of the token. Contract receivers get their hook invoked.
    pub to: Receiver,
    /// The token to reassign.
    pub token_id: ContractTokenId,
    /// Payload forwarded to a contract receiver hook.
    pub data: AdditionalData,
}

/// Parameters for the `tokensOf` view.
#[derive(Debug, Serialize, SchemaType)]
pub struct TokensOfParams {
    /// Address whose holdings are enumerated.
    pub owner: Address,
    /// Number of tokens to skip from the start of the holdings.
    pub skip: u32,
    /// Maximum number of tokens to return.
    pub show: u32,
}

/// Parameters for the `upgrade` endpoint.
#[derive(Debug, Serialize, SchemaType)]
pub struct UpgradeParams {
    /// Reference of the module to upgrade to.
    pub module: ModuleReference,
    /// Optional entrypoint to call in the new module after the upgrade,
    /// with its serialized parameter.
    pub migrate: Option<(OwnedEntrypointName, Vec<u8>)>,
}

/// Token properties record, written exactly once at mint.
#[derive(Debug, Serialize, SchemaType, Clone, PartialEq, Eq)]
pub struct TokenProperties {
    pub token_id: ContractTokenId,
    pub name: String,
    pub image: String,
    pub description: String,
    pub token_uri: String,
}

/// Routing directive carried in the auxiliary data of an inbound payment,
/// resolved once at the contract boundary.
#[derive(Debug, PartialEq, Eq)]
pub enum PaymentData {
    /// No directive. The payment requests a mint subject to the supply cap.
    None,
    /// Explicit mint directive. The supply cap check is skipped.
    MintDirective,
    /// Opaque payload. The payment is kept without minting.
    Custom(Vec<u8>),
}

impl PaymentData {
    /// Resolve raw auxiliary bytes. Empty data requests a regular mint, a
    /// lone directive tag requests an uncapped mint, anything else marks a
    /// donation.
    pub fn resolve(data: &AdditionalData) -> Self {
        match data.as_ref() {
            [] => PaymentData::None,
            [MINT_DIRECTIVE_TAG] => PaymentData::MintDirective,
            bytes => PaymentData::Custom(bytes.to_vec()),
        }
    }

    /// Whether this payment should mint a token.
    pub fn requests_mint(&self) -> bool {
        !matches!(self, PaymentData::Custom(_))
    }

    /// Whether the supply cap applies to this payment.
    pub fn respects_supply_cap(&self) -> bool {
        matches!(self, PaymentData::None)
    }
}
