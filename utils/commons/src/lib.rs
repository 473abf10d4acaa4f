#![cfg_attr(not(feature = "std"), no_std)]

//! Shared types for the CollectionNFT contracts: the error taxonomy, the
//! contract type aliases and the event tag constants.

use concordium_cis2::*;
use concordium_std::*;

mod constants;
mod errors;
mod types;

pub use crate::{constants::*, errors::*, types::*};
