use commons::*;
use concordium_cis2::*;
use concordium_std::*;

/// Tagged custom event to be serialized for the event log.
#[derive(Debug)]
pub enum CollectionEvent<'e> {
    /// An inbound payment was accepted, with or without a mint.
    Payment {
        /// Address the payment token reported as the source of the funds.
        payer: Address,
        /// Amount credited, in units of the payment token.
        amount: ContractTokenAmount,
        /// Auxiliary data attached to the payment, as received.
        data: &'e AdditionalData,
    },
}

impl<'e> Serial for CollectionEvent<'e> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            CollectionEvent::Payment { payer, amount, data } => {
                out.write_u8(PAYMENT_EVENT_TAG)?;
                payer.serial(out)?;
                amount.serial(out)?;
                data.serial(out)
            }
        }
    }
}
