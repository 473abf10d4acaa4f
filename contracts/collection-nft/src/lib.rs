//! An NFT collection contract with payment gated minting.
//!
//! # Description
//! The contract keeps a ledger of uniquely owned tokens. Tokens are minted
//! when the configured CIS-2 payment token credits this contract and calls
//! the `onReceivingCIS2` hook: each accepted payment mints the next token of
//! the collection to the payer, unless the auxiliary data marks the payment
//! as a plain donation. Minting is capped by an owner adjustable supply
//! limit and can be paused; the collection starts paused.
//!
//! Token properties are generated at mint and never change afterwards.
//! Transfers carry no caller restriction and notify contract receivers
//! through the CIS-2 receive hook after the ledger is updated.
//!
//! The contract owner can update the image URL prefix, the supply cap, the
//! pause flag, and upgrade the contract module.
#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
