use commons::*;
use concordium_cis2::*;
use concordium_std::*;
use core::ops::DerefMut;

use crate::external::{InitParams, TokenProperties};

/// The contract state: the collection configuration and the token ledger
/// tables.
///
/// The `balances` table is a redundant per-address count kept equal to the
/// size of the matching `holdings` set, so `balanceOf` stays O(1) no matter
/// how large a holding grows.
#[derive(Serial, DeserialWithState, StateClone, Debug)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Account with administrative authority. Fixed at initialization.
    pub contract_owner: AccountAddress,
    /// Supply cap. Owner adjustable, never below `current_supply`.
    pub total_supply: u64,
    /// Number of minted tokens. Grows by exactly one per mint.
    pub current_supply: u64,
    /// Gate on payment triggered minting.
    pub paused: bool,
    /// Price of a single mint in units of the payment token.
    pub mint_price: ContractTokenAmount,
    /// CIS-2 token contract accepted as payment.
    pub mint_asset: ContractAddress,
    /// Prefix for generated token image URLs.
    pub image_base_uri: String,
    /// Token properties, written exactly once at mint.
    properties: StateMap<ContractTokenId, TokenProperties, S>,
    /// Current owner of every minted token.
    owners: StateMap<ContractTokenId, Address, S>,
    /// Tokens held by each address, the enumeration source for `tokensOf`.
    holdings: StateMap<Address, StateSet<ContractTokenId, S>, S>,
    /// Token count per address.
    balances: StateMap<Address, u64, S>,
}

impl<S: HasStateApi> State<S> {
    /// Construct the state of a fresh collection. Minting starts paused.
    pub fn new(state_builder: &mut StateBuilder<S>, params: InitParams) -> Self {
        State {
            contract_owner: params.owner,
            total_supply: params.total_supply,
            current_supply: 0,
            paused: true,
            mint_price: params.mint_price,
            mint_asset: params.mint_asset,
            image_base_uri: params.image_base_uri,
            properties: state_builder.new_map(),
            owners: state_builder.new_map(),
            holdings: state_builder.new_map(),
            balances: state_builder.new_map(),
        }
    }

    /// Mint the next token of the collection to `owner`. Allocates the token
    /// ID from the mint counter, writes the properties record and updates
    /// all ownership tables together. Returns the new token ID.
    pub fn mint(
        &mut self,
        owner: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<ContractTokenId> {
        let index = self.current_supply + 1;
        let text = decimal_text(index);

        let mut image = self.image_base_uri.clone();
        image.push_str(&text);
        image.push_str(IMAGE_URL_EXTENSION);

        let token_id = TokenIdVec(text.into_bytes());
        let record = TokenProperties {
            token_id: token_id.clone(),
            name: String::new(),
            image,
            description: String::from(TOKEN_DESCRIPTION_PLACEHOLDER),
            token_uri: String::new(),
        };

        // Token IDs come from the counter, so an existing record means the
        // counter was tampered with. Properties are never overwritten.
        ensure!(
            self.properties.insert(token_id.clone(), record).is_none(),
            CustomContractError::StateConflict.into()
        );

        self.current_supply = index;
        self.owners.insert(token_id.clone(), owner);
        self.holdings
            .entry(owner)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(token_id.clone());
        let mut balance = self.balances.entry(owner).or_insert_with(|| 0);
        *balance += 1;

        Ok(token_id)
    }

    /// Reassign `token_id` to `to` and return the previous owner.
    ///
    /// The owner table is updated first, then both holdings entries, then
    /// both balances. The call rejects on the first inconsistency it finds
    /// and the host discards every change made before it, so callers never
    /// observe a partial reassignment.
    pub fn transfer(
        &mut self,
        token_id: &ContractTokenId,
        to: Address,
        state_builder: &mut StateBuilder<S>,
    ) -> ContractResult<Address> {
        let from = self
            .owners
            .get(token_id)
            .map(|owner| *owner)
            .ok_or(ContractError::InvalidTokenId)?;

        self.owners.insert(token_id.clone(), to);

        {
            let mut held = self
                .holdings
                .entry(from)
                .occupied_or(CustomContractError::StateConflict)?;
            ensure!(
                held.contains(token_id),
                CustomContractError::StateConflict.into()
            );
            held.remove(token_id);
        }
        self.holdings
            .entry(to)
            .or_insert_with(|| state_builder.new_set())
            .deref_mut()
            .insert(token_id.clone());

        {
            let mut balance = self
                .balances
                .entry(from)
                .occupied_or(CustomContractError::StateConflict)?;
            ensure!(*balance > 0, CustomContractError::StateConflict.into());
            *balance -= 1;
        }
        {
            let mut balance = self.balances.entry(to).or_insert_with(|| 0);
            *balance += 1;
        }

        Ok(from)
    }

    /// Number of tokens currently held by `address`. Unknown addresses hold
    /// zero tokens.
    pub fn balance_of(&self, address: &Address) -> u64 {
        self.balances.get(address).map_or(0, |balance| *balance)
    }

    /// Current owner of `token_id`, if it was minted.
    pub fn owner_of(&self, token_id: &ContractTokenId) -> Option<Address> {
        self.owners.get(token_id).map(|owner| *owner)
    }

    /// Page through the tokens held by `owner`. Iteration order over a
    /// holdings set is implementation defined but stable between calls, so
    /// paging with a growing `skip` enumerates every held token.
    pub fn tokens_of(&self, owner: &Address, skip: u32, show: u32) -> Vec<ContractTokenId> {
        self.holdings.get(owner).map_or_else(Vec::new, |held| {
            held.iter()
                .skip(skip as usize)
                .take(show as usize)
                .map(|token_id| (*token_id).clone())
                .collect()
        })
    }

    /// Properties of `token_id` as recorded at mint.
    pub fn properties(&self, token_id: &ContractTokenId) -> ContractResult<TokenProperties> {
        self.properties
            .get(token_id)
            .map(|record| (*record).clone())
            .ok_or(ContractError::InvalidTokenId)
    }
}

/// ASCII decimal rendering of the mint counter, used as the token ID text.
pub fn decimal_text(mut value: u64) -> String {
    let mut digits = [0u8; 20];
    let mut at = digits.len();
    loop {
        at -= 1;
        digits[at] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    let mut text = String::new();
    for digit in &digits[at..] {
        text.push(*digit as char);
    }
    text
}

#[concordium_cfg_test]
mod tests {
    use super::*;

    #[concordium_test]
    fn test_decimal_text() {
        claim_eq!(decimal_text(0), "0");
        claim_eq!(decimal_text(1), "1");
        claim_eq!(decimal_text(10), "10");
        claim_eq!(decimal_text(987_654), "987654");
        claim_eq!(decimal_text(u64::MAX), "18446744073709551615");
    }
}
